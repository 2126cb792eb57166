//! Plugin API client - status fetches and fire-and-forget commands.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::status::PluginStatus;

/// Commands accepted by the plugin API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PluginCommand {
    GetPluginStatus,
    ToggleSentryOpt,
}

/// Source of status payloads.
pub trait StatusSource {
    fn fetch_status(&self) -> Result<PluginStatus>;
}

/// Fire-and-forget command channel. No response contract is relied upon
/// beyond the HTTP status.
pub trait CommandSink {
    fn send_command(&self, command: PluginCommand) -> Result<()>;
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Host base URL, e.g. `http://localhost:5000`.
    pub base_url: String,
    /// Plugin identifier in the API path.
    pub plugin_id: String,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            plugin_id: "printwatch".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Blocking HTTP implementation of both the status source and command sink,
/// POSTing JSON commands to `api/plugin/<plugin_id>`.
#[derive(Debug, Clone)]
pub struct HttpPluginApi {
    client: reqwest::blocking::Client,
    config: HttpConfig,
}

impl HttpPluginApi {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/plugin/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.plugin_id
        )
    }

    fn post(&self, command: PluginCommand) -> Result<reqwest::blocking::Response> {
        let url = self.endpoint();
        debug!(url = %url, ?command, "sending plugin API command");

        let response = self
            .client
            .post(&url)
            .json(&command)
            .send()
            .with_context(|| format!("plugin API request to {} failed", url))?;

        if !response.status().is_success() {
            bail!("plugin API returned {}", response.status());
        }
        Ok(response)
    }
}

impl StatusSource for HttpPluginApi {
    fn fetch_status(&self) -> Result<PluginStatus> {
        self.post(PluginCommand::GetPluginStatus)?
            .json()
            .context("failed to parse plugin status payload")
    }
}

impl CommandSink for HttpPluginApi {
    fn send_command(&self, command: PluginCommand) -> Result<()> {
        self.post(command).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_shape() {
        assert_eq!(
            serde_json::to_string(&PluginCommand::GetPluginStatus).unwrap(),
            r#"{"command":"get_plugin_status"}"#
        );
        assert_eq!(
            serde_json::to_string(&PluginCommand::ToggleSentryOpt).unwrap(),
            r#"{"command":"toggle_sentry_opt"}"#
        );
    }

    #[test]
    fn test_endpoint_format() {
        let api = HttpPluginApi::new(HttpConfig {
            base_url: "http://octopi.local:5000/".to_string(),
            plugin_id: "printwatch".to_string(),
            timeout_secs: 5,
        })
        .unwrap();

        assert_eq!(api.endpoint(), "http://octopi.local:5000/api/plugin/printwatch");
    }

    #[test]
    fn test_default_config() {
        let config = HttpConfig::default();
        assert_eq!(config.plugin_id, "printwatch");
        assert_eq!(config.timeout_secs, 30);
    }
}
