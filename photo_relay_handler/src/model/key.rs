use lambda_runtime::tracing;
use thiserror::Error;

/// Length of the extension stripped from every object name, e.g. `.jpg`
const EXTENSION_LEN: usize = 4;

/// Sentinel written upstream for users without a last name
const NO_LAST_NAME: &str = "None";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("name is shorter than its 4 character extension")]
    TooShort,
    #[error("expected 4 '-' separated fields, got {0}")]
    FieldCount(usize),
    #[error("chat id suffix {0:?} is not numeric")]
    InvalidChatId(String),
    #[error("first name is empty")]
    EmptyFirstName,
}

/// Where a photo goes and who sent it, parsed from the object name
/// `<anything>-<chat id suffix>-<first name>-<last name or None>.ext`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryMetadata {
    pub chat_id: String,
    pub first_name: String,
    /// Empty when the sender has no last name
    pub last_name: String,
}

impl DeliveryMetadata {
    #[tracing::instrument(err)]
    pub fn from_object_name(object_name: &str) -> Result<Self, KeyError> {
        let (stem_end, _) = object_name
            .char_indices()
            .rev()
            .nth(EXTENSION_LEN - 1)
            .ok_or(KeyError::TooShort)?;
        let stem = &object_name[..stem_end];

        let fields = stem.split('-').collect::<Vec<&str>>();
        let [_, chat_id_suffix, first_name, last_name] = fields[..] else {
            return Err(KeyError::FieldCount(fields.len()));
        };

        if chat_id_suffix.is_empty() || !chat_id_suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(KeyError::InvalidChatId(chat_id_suffix.to_string()));
        }

        if first_name.is_empty() {
            return Err(KeyError::EmptyFirstName);
        }

        let last_name = match last_name {
            NO_LAST_NAME => "",
            name => name,
        };

        Ok(Self {
            // group chats have negative ids
            chat_id: format!("-{chat_id_suffix}"),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    /// Keeps the trailing space when there is no last name
    pub fn caption(&self) -> String {
        format!("Message from {} {}", self.first_name, self.last_name)
    }
}
