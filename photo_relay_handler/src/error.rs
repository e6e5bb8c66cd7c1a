use telegram_client::TelegramError;
use thiserror::Error;

use crate::model::key::KeyError;

/// Everything that can stop a single upload from being relayed
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("s3 event did not contain any records")]
    EmptyEvent,
    #[error("s3 record is missing the {0}")]
    MissingField(&'static str),
    #[error("object key {key:?} is not valid utf-8 once decoded")]
    UndecodableKey {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("malformed object key {key:?}: {reason}")]
    MalformedKey {
        key: String,
        #[source]
        reason: KeyError,
    },
    #[error("unable to fetch s3://{bucket}/{key}")]
    FetchFailure {
        bucket: String,
        key: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("unable to send photo to chat {chat_id}")]
    SendFailure {
        chat_id: String,
        #[source]
        source: TelegramError,
    },
}
