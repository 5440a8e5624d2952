//! Dataset files shared by the crawler and the benchmark.

mod dataset_reader;
mod dataset_writer;

pub use dataset_reader::Dataset;
pub use dataset_reader::read_dataset;
pub use dataset_reader::read_dataset_from;
pub use dataset_writer::DatasetWriter;

pub const BLOCK_NUMBER_COLUMN: &str = "block_number";
pub const ADDRESS_COLUMN: &str = "address";
pub const STORAGE_SLOT_COLUMN: &str = "storage_slot";
pub const RANDOMIZED_ACCOUNT_COLUMN: &str = "randomized_account";
pub const RANDOMIZED_SLOT_COLUMN: &str = "randomized_slot";

/// Address column name of older datasets.
pub const LEGACY_ADDRESS_COLUMN: &str = "to";

/// Columns of datasets written by the crawler.
pub const HEADERS: [&str; 5] = [
    BLOCK_NUMBER_COLUMN,
    ADDRESS_COLUMN,
    STORAGE_SLOT_COLUMN,
    RANDOMIZED_ACCOUNT_COLUMN,
    RANDOMIZED_SLOT_COLUMN,
];
