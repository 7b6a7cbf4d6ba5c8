//! Defines the configuration of the light provider program.

use std::{fs, num::NonZeroUsize, path::Path, str::FromStr};

use anyhow::Context;
use serde::de::DeserializeOwned;
use tendermint_light_client_provider::{
    http::HttpClient, ProviderError, RpcProvider, DEFAULT_MAX_VALIDATOR_PAGES,
};
use tracing::Level;

/// The top level configuration.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::module_name_repetitions)]
pub struct ProviderConfig {
    /// The chain id every fetched header must carry.
    pub chain_id: String,
    /// The tendermint RPC endpoint of the full node.
    pub rpc_url: String,
    /// The maximum number of validator pages fetched for one set.
    /// `0` removes the limit.
    #[serde(default = "default_max_validator_pages")]
    pub max_validator_pages: usize,
    /// The log level.
    #[serde(default)]
    pub log_level: String,
}

const fn default_max_validator_pages() -> usize {
    DEFAULT_MAX_VALIDATOR_PAGES.get()
}

impl ProviderConfig {
    /// Read and parse the configuration file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config_bz = fs::read(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        parse_config(&config_bz)
    }

    /// Returns the configured log level, `INFO` if unset or unknown.
    #[must_use]
    pub fn log_level(&self) -> Level {
        Level::from_str(&self.log_level).unwrap_or(Level::INFO)
    }

    /// Build a provider for the configured chain and endpoint.
    ///
    /// # Errors
    /// Returns an error if the RPC url is invalid.
    pub fn build_provider(&self) -> Result<RpcProvider<HttpClient>, ProviderError> {
        let provider = RpcProvider::from_rpc_url(self.chain_id.clone(), &self.rpc_url)?;

        Ok(match NonZeroUsize::new(self.max_validator_pages) {
            Some(max_pages) => provider.with_max_pages(max_pages),
            None => provider.without_page_limit(),
        })
    }
}

/// Parse a JSON configuration, reporting the path of the offending field on
/// failure (e.g. `chain_id`).
///
/// # Errors
/// Returns an error with the field path and the original serde message.
pub fn parse_config<T>(config_bz: &[u8]) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_slice(config_bz);
    serde_path_to_error::deserialize::<_, T>(&mut deserializer)
        .map_err(|e| anyhow::anyhow!("config error at {}: {}", e.path(), e.inner()))
}
