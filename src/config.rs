//! Client settings. In the browser they come from the page URL
//! (`/play?id=<session>`); the headless CLI builds them from its TOML file.

use std::time::Duration;
use url::Url;

use crate::error::ClientError;

/// Delay between two polls
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 3000;
pub const DEFAULT_CARD_IMAGE_BASE: &str = "/images/cards";
/// Where "quit" leads
pub const DEFAULT_QUIT_PATH: &str = "/sessions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base the endpoint paths are resolved against; always ends with '/'
    pub server: Url,
    pub session: String,
    pub poll_interval_ms: u32,
    pub card_image_base: String,
    pub quit_path: String,
}

impl ClientConfig {
    pub fn new(mut server: Url, session: impl Into<String>) -> Self {
        if !server.path().ends_with('/') {
            let path = format!("{}/", server.path());
            server.set_path(&path);
        }
        server.set_query(None);
        server.set_fragment(None);
        Self {
            server,
            session: session.into(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            card_image_base: DEFAULT_CARD_IMAGE_BASE.to_string(),
            quit_path: DEFAULT_QUIT_PATH.to_string(),
        }
    }

    /// Build from the address of the game page. The session comes from the
    /// `id` query parameter and the server is the page origin.
    pub fn from_page_url(href: &str) -> Result<Self, ClientError> {
        let page = Url::parse(href)?;
        let session = page
            .query_pairs()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ClientError::MissingParam("id"))?;
        let server = page.join("/")?;
        Ok(Self::new(server, session))
    }

    pub fn with_poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms))
    }
}
