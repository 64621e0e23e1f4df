use serde::Deserialize;

use hybridge_core::error::{BridgeError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    pub version: u32,

    #[serde(default)]
    pub host: HostSection,
}

impl HostConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BridgeError::BadRequest(
                "unsupported config version (expected 1)".into(),
            ));
        }
        self.host.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Size cap applied to inbound envelopes and invoke requests, before any
    /// parsing happens.
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

impl HostSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.is_empty() {
            return Err(BridgeError::BadRequest("host.listen must not be empty".into()));
        }
        if !(512..=4_194_304).contains(&self.max_message_bytes) {
            return Err(BridgeError::BadRequest(
                "host.max_message_bytes must be between 512 and 4194304".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "127.0.0.1:8080".into()
}
fn default_max_message_bytes() -> usize {
    65536
}
