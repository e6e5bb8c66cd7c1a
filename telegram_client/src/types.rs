use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("request to the bot api failed: {0}")]
    Request(reqwest::Error),
    #[error("bot api rejected the request ({code}): {description}")]
    Api { code: i64, description: String },
    #[error("unexpected response from the bot api, HTTP {status}")]
    UnexpectedResponse { status: u16 },
}

impl From<reqwest::Error> for TelegramError {
    // the request url carries the bot token
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Request(err.without_url())
    }
}

/// The envelope every bot api method responds with
#[derive(Debug, serde::Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error_code: Option<i64>,
    pub description: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self, status: u16) -> Result<T, TelegramError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(TelegramError::UnexpectedResponse { status }),
            (false, _) => Err(TelegramError::Api {
                code: self.error_code.unwrap_or(i64::from(status)),
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// The subset of a sent message we care about
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
}
