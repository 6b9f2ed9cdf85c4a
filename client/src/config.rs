use crate::blockchain::ClientSettings;
use crate::error::{ClientError, ClientResult};
use ethers::types::U256;
use lottery_shared::*;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

const ENV_PREFIX: &str = "LOTTERY";
const CONFIG_FILE: &str = "lottery";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[validate(url)]
    pub rpc_url: String,
    pub private_key: String,
    /// Queried from the provider when unset.
    pub chain_id: Option<u64>,
    pub artifacts_dir: PathBuf,
    #[validate(range(min = 1))]
    pub confirmations: usize,
    #[validate(range(min = 1))]
    pub poll_interval_ms: u64,
    #[validate(range(min = 1))]
    pub confirm_timeout_secs: u64,
    pub gas_limit: Option<u64>,
    pub gas_price: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            private_key: DEVNET_PRIVATE_KEY.to_string(),
            chain_id: None,
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            confirmations: DEFAULT_CONFIRMATIONS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            confirm_timeout_secs: DEFAULT_CONFIRM_TIMEOUT_SECS,
            gas_limit: None,
            gas_price: None,
        }
    }
}

impl Settings {
    /// Defaults, then an optional `lottery.{toml,yaml,json}` file, then
    /// `LOTTERY_*` environment variables (a `.env` file is honoured).
    pub fn from_env() -> ClientResult<Self> {
        dotenvy::dotenv().ok();

        Self::load(
            config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    fn load(environment: config::Environment) -> ClientResult<Self> {
        let config = config::Config::builder()
            .set_default("rpc_url", DEFAULT_RPC_URL)?
            .set_default("private_key", DEVNET_PRIVATE_KEY)?
            .set_default("artifacts_dir", DEFAULT_ARTIFACTS_DIR)?
            .set_default("confirmations", DEFAULT_CONFIRMATIONS as u64)?
            .set_default("poll_interval_ms", DEFAULT_POLL_INTERVAL_MS)?
            .set_default("confirm_timeout_secs", DEFAULT_CONFIRM_TIMEOUT_SECS)?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(environment)
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings
            .validate()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(settings)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            confirmations: self.confirmations,
            poll_interval: self.poll_interval(),
            confirm_timeout: Duration::from_secs(self.confirm_timeout_secs),
            gas_limit: self.gas_limit.map(U256::from),
            gas_price: self.gas_price.map(U256::from),
        }
    }
}
