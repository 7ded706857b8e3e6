use serde::Deserialize;
use thincloud_core::error::{Result, ThinCloudError};

/// Connection settings for a ThinCloud MQTT session.
///
/// Devices authenticate with mutual TLS; the three PEM paths are required.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub client_id: String,

    pub root_ca_path: String,
    pub client_cert_path: String,
    pub private_key_path: String,

    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,

    #[serde(default)]
    pub auto_reconnect: bool,

    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(ThinCloudError::Config("host must not be empty".into()));
        }
        if self.client_id.is_empty() {
            return Err(ThinCloudError::Config("client_id must not be empty".into()));
        }
        if !(10..=1200).contains(&self.keep_alive_secs) {
            return Err(ThinCloudError::Config(
                "keep_alive_secs must be between 10 and 1200".into(),
            ));
        }
        if !(1000..=120000).contains(&self.operation_timeout_ms) {
            return Err(ThinCloudError::Config(
                "operation_timeout_ms must be between 1000 and 120000".into(),
            ));
        }
        Ok(())
    }
}

fn default_port() -> u16 {
    443
}
fn default_keep_alive_secs() -> u64 {
    600
}
fn default_operation_timeout_ms() -> u64 {
    20000
}
