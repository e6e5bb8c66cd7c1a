use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;
use telegram_client::{Message, TelegramClient, TelegramError};

#[cfg(test)]
pub use MockTelegramService as Telegram;
#[cfg(not(test))]
pub use TelegramService as Telegram;

/// The bot the relay posts as
#[derive(Clone, Debug)]
pub struct TelegramService {
    inner: TelegramClient,
}

#[cfg_attr(test, automock)]
impl TelegramService {
    pub fn new(inner: TelegramClient) -> Self {
        Self { inner }
    }

    #[tracing::instrument(skip(self, photo))]
    pub async fn send_photo(
        &self,
        chat_id: &str,
        photo: Vec<u8>,
        file_name: &str,
        caption: &str,
    ) -> Result<Message, TelegramError> {
        self.inner
            .send_photo(chat_id, photo, file_name, caption)
            .await
    }
}
