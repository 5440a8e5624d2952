//! Type aliases for external crates types that conflict with our own types or are too verbose.

// -----------------------------------------------------------------------------
// Serde
// -----------------------------------------------------------------------------
pub type JsonValue = serde_json::Value;

// -----------------------------------------------------------------------------
// CSV
// -----------------------------------------------------------------------------
pub type CsvFileWriter = csv::Writer<std::fs::File>;
