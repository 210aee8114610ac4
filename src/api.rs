//! HTTP access to the game server. The same client runs in the browser
//! (reqwest's fetch backend) and natively.

use thousand_shared::{ChatCursor, Command, Snapshot};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct GameClient {
    http: reqwest::Client,
    server: Url,
    session: String,
}

impl GameClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            server: config.server.clone(),
            session: config.session.clone(),
        }
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    /// `GET update?id=<session>[&last_chat=<cursor>]`
    pub fn update_url(&self, cursor: Option<&ChatCursor>) -> Result<Url, ClientError> {
        let mut url = self.server.join("update")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("id", &self.session);
            if let Some(cursor) = cursor {
                query.append_pair("last_chat", cursor.as_str());
            }
        }
        Ok(url)
    }

    /// `POST <command>?id=<session>&...`
    pub fn command_url(&self, command: &Command) -> Result<Url, ClientError> {
        let mut url = self.server.join(command.path())?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("id", &self.session);
            for (key, value) in command.params() {
                query.append_pair(key, &value);
            }
        }
        Ok(url)
    }

    /// Fetch the latest snapshot. Bodies are decoded by hand so that an
    /// HTML error page served with status 200 surfaces as a decode error.
    pub async fn fetch_snapshot(&self, cursor: Option<&ChatCursor>) -> Result<Snapshot, ClientError> {
        let url = self.update_url(cursor)?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| ClientError::Http {
            url: url.to_string(),
            source,
        })?;
        let snapshot = serde_json::from_str(&body)?;
        Ok(snapshot)
    }

    /// Fire a command. The response body carries nothing; only the status
    /// is checked.
    pub async fn send(&self, command: &Command) -> Result<(), ClientError> {
        let url = self.command_url(command)?;
        tracing::debug!(%command, "sending command");
        let response = self
            .http
            .post(url.clone())
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
