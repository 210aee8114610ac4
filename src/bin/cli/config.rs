use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thousand::config::{ClientConfig, DEFAULT_POLL_INTERVAL_MS};
use url::Url;

/// CLI configuration persisted as TOML.
///
/// Fields:
/// - server: base URL of the game server
/// - session: game session id, the `id` the game page is opened with
/// - poll_interval_ms: delay between polls in watch mode
/// - wait_ms: how long a single request may take
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    pub server: String,
    pub session: Option<String>,
    pub poll_interval_ms: u32,
    pub wait_ms: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            server: "http://localhost:8080".to_string(),
            session: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            wait_ms: 5000,
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`. If the file does not exist, create it
    /// with defaults and return those.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)
                .with_context(|| format!("reading config file '{}'", path.display()))?;
            let cfg: CliConfig = toml::from_str(&s)
                .with_context(|| format!("parsing TOML config '{}'", path.display()))?;
            Ok(cfg)
        } else {
            let cfg = CliConfig::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating config directory '{}'", parent.display()))?;
            }
        }
        let toml_text = toml::to_string_pretty(self).context("serializing config to TOML")?;
        fs::write(path, toml_text)
            .with_context(|| format!("writing config to '{}'", path.display()))?;
        Ok(())
    }

    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    /// Settings for the shared client. Fails without a session id.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let server = Url::parse(&self.server)
            .with_context(|| format!("parsing server url '{}'", self.server))?;
        let session = self
            .session
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("no session id: pass --session or set `session` in the config"))?;
        Ok(ClientConfig::new(server, session).with_poll_interval_ms(self.poll_interval_ms))
    }
}
