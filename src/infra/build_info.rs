use serde_json::json;

// -----------------------------------------------------------------------------
// Build constants
// -----------------------------------------------------------------------------
pub const BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

pub const CARGO_DEBUG: &str = env!("VERGEN_CARGO_DEBUG");
pub const CARGO_FEATURES: &str = env!("VERGEN_CARGO_FEATURES");
pub const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const RUST_VERSION: &str = env!("VERGEN_RUSTC_SEMVER");
pub const RUST_CHANNEL: &str = env!("VERGEN_RUSTC_CHANNEL");
pub const RUST_TARGET: &str = env!("VERGEN_RUSTC_HOST_TRIPLE");

const VERSION_WITH_TOOLCHAIN: &str = const_format::formatcp!("{}::rustc-{}-{}", CARGO_PKG_VERSION, RUST_VERSION, RUST_CHANNEL);

const SERVICE_NAME_PREFIX: &str = "eth-proof-bench";

/// Returns the current service name.
pub fn service_name() -> String {
    format!("{}-{}", SERVICE_NAME_PREFIX, binary_name())
}

/// Returns the current service name with version.
pub fn service_name_with_version() -> String {
    format!("{}::{}", service_name(), version())
}

/// Returns the current binary basename.
pub fn binary_name() -> String {
    let binary_basename = std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().to_lowercase()))
        .unwrap_or_else(|| SERVICE_NAME_PREFIX.to_owned());

    if binary_basename.starts_with("test_") {
        "tests".to_string()
    } else {
        binary_basename
    }
}

/// Returns the version derived from the build information.
pub fn version() -> &'static str {
    CARGO_PKG_VERSION
}

/// Returns build info as JSON.
pub fn as_json() -> serde_json::Value {
    json!(
        {
            "build": {
                "service_name": service_name(),
                "binary_name": binary_name(),
                "version": version(),
                "version_with_toolchain": VERSION_WITH_TOOLCHAIN,
                "service_name_with_version": service_name_with_version(),
                "timestamp": BUILD_TIMESTAMP,
            },
            "cargo": {
                "debug": CARGO_DEBUG,
                "features": CARGO_FEATURES,
            },
            "rust": {
                "version": RUST_VERSION,
                "channel": RUST_CHANNEL,
                "target": RUST_TARGET
            }
        }
    )
}
