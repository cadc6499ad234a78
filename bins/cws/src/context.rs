//! Resolution of global flags, environment and config file
//!
//! Flags and environment variables are merged by clap; values still missing
//! afterwards fall back to the config file.

use clap::Args;
use cws_api_client::{AuthConfig, ClientConfig, CwsClient, ItemName};
use cws_core::config::Config;
use cws_core::{Error, ErrorCode, Result};
use std::time::Duration;
use tracing::debug;

use crate::commands::{api_error, LogFormat};

/// Flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Publisher ID of the item
    #[arg(long, global = true, env = "CHROME_WEBSTORE_PUBLISHER_ID")]
    pub publisher_id: Option<String>,

    /// Item (extension) ID
    #[arg(long, global = true, env = "CHROME_WEBSTORE_ITEM_ID")]
    pub item_id: Option<String>,

    /// Print responses as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Format of log lines on stderr
    #[arg(long, global = true, value_enum, default_value_t, env = "CWS_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true, env = "CWS_API_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the upload base URL
    #[arg(long, global = true, env = "CWS_UPLOAD_URL", value_name = "URL")]
    pub upload_base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "CWS_TIMEOUT_SECS", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// OAuth access token, used instead of the refresh token flow
    #[arg(long, global = true, env = "CHROME_WEBSTORE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    #[arg(long, global = true, hide = true, env = "CHROME_WEBSTORE_CLIENT_ID")]
    pub client_id: Option<String>,

    #[arg(
        long,
        global = true,
        hide = true,
        env = "CHROME_WEBSTORE_CLIENT_SECRET",
        hide_env_values = true
    )]
    pub client_secret: Option<String>,

    #[arg(
        long,
        global = true,
        hide = true,
        env = "CHROME_WEBSTORE_REFRESH_TOKEN",
        hide_env_values = true
    )]
    pub refresh_token: Option<String>,
}

/// Everything a command needs to talk to the store
#[derive(Debug)]
pub struct Context {
    pub args: GlobalArgs,
    pub config: Config,
}

impl Context {
    /// Load the config file and merge it under the flags
    pub fn resolve(args: GlobalArgs) -> Result<Self> {
        let config = Config::load(args.config.as_deref())?;
        if let Some(ref path) = config.path {
            debug!(path = %path.display(), "Loaded config file");
        }
        Ok(Self { args, config })
    }

    /// Whether output should be JSON
    pub fn json(&self) -> bool {
        self.args.json
    }

    /// The item the command operates on
    pub fn item_name(&self) -> Result<ItemName> {
        let item = &self.config.schema.item;
        let publisher_id = pick(self.args.publisher_id.as_deref(), item.publisher_id.as_deref())
            .ok_or_else(|| Error::missing_argument("--publisher-id", "CHROME_WEBSTORE_PUBLISHER_ID"))?;
        let item_id = pick(self.args.item_id.as_deref(), item.item_id.as_deref())
            .ok_or_else(|| Error::missing_argument("--item-id", "CHROME_WEBSTORE_ITEM_ID"))?;

        format!("publishers/{publisher_id}/items/{item_id}")
            .parse()
            .map_err(api_error)
    }

    /// Endpoint configuration
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api = &self.config.schema.api;
        let mut config = ClientConfig::default();

        if let Some(url) = pick(self.args.base_url.as_deref(), api.base_url.as_deref()) {
            config = config.with_base_url(url);
        }
        if let Some(url) = pick(self.args.upload_base_url.as_deref(), api.upload_base_url.as_deref()) {
            config = config.with_upload_base_url(url);
        }
        if let Some(secs) = self.args.timeout.or(api.timeout_secs) {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate().map_err(|e| {
            Error::new(ErrorCode::InvalidConfigValue, e.to_string())
                .with_suggestion("Check --base-url, --upload-base-url and --timeout")
        })?;
        Ok(config)
    }

    /// An authenticated client
    pub fn client(&self) -> Result<CwsClient> {
        let client = CwsClient::new(self.client_config()?).map_err(api_error)?;
        let credentials = &self.config.schema.credentials;

        if let Some(token) = pick(self.args.access_token.as_deref(), credentials.access_token.as_deref()) {
            debug!("Authenticating with an access token");
            return Ok(client.with_access_token(token));
        }

        let client_id = pick(self.args.client_id.as_deref(), credentials.client_id.as_deref());
        let client_secret = pick(self.args.client_secret.as_deref(), credentials.client_secret.as_deref());
        let refresh_token = pick(self.args.refresh_token.as_deref(), credentials.refresh_token.as_deref());

        match (client_id, client_secret, refresh_token) {
            (Some(id), Some(secret), Some(refresh)) => {
                debug!(client_id = %id, "Authenticating with a refresh token");
                client
                    .with_credentials(AuthConfig::new(id, secret, refresh))
                    .map_err(api_error)
            }
            (id, secret, refresh) => {
                let missing: Vec<&str> = [
                    ("CHROME_WEBSTORE_CLIENT_ID", id.is_none()),
                    ("CHROME_WEBSTORE_CLIENT_SECRET", secret.is_none()),
                    ("CHROME_WEBSTORE_REFRESH_TOKEN", refresh.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(Error::missing_credentials(&missing))
            }
        }
    }
}

/// First non-empty value of a flag and its config file fallback
fn pick(flag: Option<&str>, file: Option<&str>) -> Option<String> {
    let present = |v: &&str| !v.is_empty();
    flag.filter(present).or(file.filter(present)).map(str::to_string)
}
