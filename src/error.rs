use thiserror::Error;

/// Everything that can go wrong between the page and the game server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server answered {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("could not decode snapshot: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("missing '{0}' query parameter")]
    MissingParam(&'static str),

    #[error("no element with id '{0}'")]
    MissingElement(String),

    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for ClientError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        ClientError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ClientError> for wasm_bindgen::JsValue {
    fn from(err: ClientError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
