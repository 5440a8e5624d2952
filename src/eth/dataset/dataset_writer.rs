use std::path::Path;

use anyhow::Context;

use crate::alias::CsvFileWriter;
use crate::eth::crawler::CrawlSink;
use crate::eth::dataset::HEADERS;
use crate::eth::primitives::CrawlRow;

/// Writes crawled rows to a dataset file.
pub struct DatasetWriter {
    writer: CsvFileWriter,
}

impl DatasetWriter {
    /// Creates or truncates the file at `path` and writes the header line.
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        tracing::info!(path = %path.display(), "creating dataset");

        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(path)
            .with_context(|| format!("failed to create dataset {}", path.display()))?;
        writer.write_record(HEADERS).context("failed to write dataset header")?;

        Ok(Self { writer })
    }

    pub fn write_row(&mut self, row: &CrawlRow) -> anyhow::Result<()> {
        let record = [
            row.block_number.map(|number| number.to_string()).unwrap_or_default(),
            row.address.clone(),
            row.storage_slot.clone().unwrap_or_else(|| "null".to_owned()),
            capitalized_bool(row.randomized_account).to_owned(),
            capitalized_bool(row.randomized_slot).to_owned(),
        ];
        self.writer.write_record(record).context("failed to write dataset row")
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush().context("failed to flush dataset")
    }
}

impl CrawlSink for DatasetWriter {
    fn push(&mut self, row: CrawlRow) -> anyhow::Result<()> {
        self.write_row(&row)
    }
}

/// Boolean as accepted by the analysis tooling consuming the dataset.
fn capitalized_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
