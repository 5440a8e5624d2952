use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;

use crate::eth::ConfigurationError;
use crate::eth::dataset::ADDRESS_COLUMN;
use crate::eth::dataset::BLOCK_NUMBER_COLUMN;
use crate::eth::dataset::LEGACY_ADDRESS_COLUMN;
use crate::eth::dataset::STORAGE_SLOT_COLUMN;
use crate::eth::primitives::BlockNumber;
use crate::eth::primitives::TestCase;

/// Rows read from a dataset file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub rows: Vec<TestCase>,

    /// Rows ignored because they have no address.
    pub skipped: usize,
}

/// Reads a dataset file.
///
/// Fails with [`ConfigurationError::MissingColumns`] if a required column is missing.
pub fn read_dataset(path: &Path) -> anyhow::Result<Dataset> {
    tracing::info!(path = %path.display(), "reading dataset");

    let file = File::open(path).with_context(|| format!("failed to open dataset {}", path.display()))?;
    let dataset = read_dataset_from(file)?;

    tracing::info!(rows = %dataset.rows.len(), skipped = %dataset.skipped, "read dataset");
    Ok(dataset)
}

/// Reads dataset rows from any CSV source with a header line.
pub fn read_dataset_from<R: Read>(source: R) -> anyhow::Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).trim(csv::Trim::All).from_reader(source);

    let headers = reader.headers().context("failed to read dataset header")?;
    let columns = Columns::locate(headers)?;

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (line, record) in reader.records().enumerate() {
        let record = record.context("failed to read dataset row")?;

        let address = record.get(columns.address).unwrap_or_default();
        if address.is_empty() {
            tracing::debug!(line = %(line + 2), "skipping row without address");
            skipped += 1;
            continue;
        }

        let block_number = record.get(columns.block_number).and_then(|value| parse_block_number(value, line + 2));
        let storage_slot = record.get(columns.storage_slot).and_then(parse_storage_slot);
        rows.push(TestCase::new(address, storage_slot, block_number));
    }

    if skipped > 0 {
        tracing::warn!(%skipped, "skipped dataset rows without address");
    }
    Ok(Dataset { rows, skipped })
}

/// Decimal or `0x` hex block number. Anything else is treated as absent.
fn parse_block_number(value: &str, line: usize) -> Option<BlockNumber> {
    if value.is_empty() {
        return None;
    }
    match BlockNumber::from_str(value) {
        Ok(number) => Some(number),
        Err(e) => {
            tracing::warn!(reason = ?e, %line, %value, "discarding invalid block number, row will inherit the previous block");
            None
        }
    }
}

/// Storage slot. Blank or `null` in any case is treated as absent.
fn parse_storage_slot(value: &str) -> Option<String> {
    if value.is_empty() || value.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(value.to_owned())
    }
}

/// Positions of the required columns in a record.
struct Columns {
    block_number: usize,
    address: usize,
    storage_slot: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, ConfigurationError> {
        let position = |name: &str| headers.iter().position(|header| header == name);

        let block_number = position(BLOCK_NUMBER_COLUMN);
        let address = position(ADDRESS_COLUMN).or_else(|| position(LEGACY_ADDRESS_COLUMN));
        let storage_slot = position(STORAGE_SLOT_COLUMN);

        match (block_number, address, storage_slot) {
            (Some(block_number), Some(address), Some(storage_slot)) => Ok(Self {
                block_number,
                address,
                storage_slot,
            }),
            _ => {
                let missing = [
                    (BLOCK_NUMBER_COLUMN, block_number),
                    (ADDRESS_COLUMN, address),
                    (STORAGE_SLOT_COLUMN, storage_slot),
                ]
                .into_iter()
                .filter_map(|(name, position)| position.is_none().then_some(name))
                .collect();
                let error = ConfigurationError::MissingColumns { missing };
                tracing::error!(reason = ?error, error = %error.name(), headers = ?headers, "dataset header is invalid");
                Err(error)
            }
        }
    }
}
