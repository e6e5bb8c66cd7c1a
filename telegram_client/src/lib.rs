pub mod send_photo;
pub mod types;

pub use types::{ApiResponse, Chat, Message, TelegramError};

pub static DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Thin client over the Telegram Bot HTTP api
#[derive(Clone)]
pub struct TelegramClient {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl TelegramClient {
    pub fn new(token: &str, url: &str) -> Result<Self, TelegramError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(TelegramError::from)?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        })
    }

    /// `<url>/bot<token>/<method>`, the bot api puts the token in the path
    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.url, self.token, method)
    }
}
