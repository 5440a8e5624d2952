use std::fmt::Debug;

use crate::config::WithCommonConfig;
use crate::config::load_dotenv;
use crate::infra::build_info;

pub mod alias;
pub mod config;
pub mod eth;
pub mod ext;
pub mod infra;

/// Executes global services initialization.
///
/// Loads the environment file, parses the configuration and initializes tracing.
pub fn init_global_services<T>() -> anyhow::Result<T>
where
    T: clap::Parser + WithCommonConfig + Debug,
{
    // parse configuration
    load_dotenv();
    let config = T::parse();

    // init services
    config.common().tracing.init()?;

    tracing::info!(build = %build_info::as_json(), "starting {}", build_info::service_name_with_version());
    tracing::info!(?config, "parsed configuration");

    Ok(config)
}
