//! Ethereum proof dataset generation and benchmarking.

pub mod benchmark;
pub mod crawler;
pub mod dataset;
mod error;
pub mod primitives;
mod resolver;

pub use error::ConfigurationError;
pub use resolver::BlockNumberResolver;
pub use resolver::Resolution;
