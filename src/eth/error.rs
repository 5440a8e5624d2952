use crate::eth::primitives::BlockNumber;

/// Invalid input detected before any network activity. Always fatal.
#[derive(Debug, thiserror::Error, strum::IntoStaticStr)]
pub enum ConfigurationError {
    // -------------------------------------------------------------------------
    // Crawler
    // -------------------------------------------------------------------------
    #[error("End block {end} is lower than start block {start}.")]
    InvertedBlockRange { start: BlockNumber, end: BlockNumber },

    // -------------------------------------------------------------------------
    // Dataset
    // -------------------------------------------------------------------------
    #[error("Dataset is missing required columns: {}.", .missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },
}

impl ConfigurationError {
    /// Error variant name, used as a log field.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
