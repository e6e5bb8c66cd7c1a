use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::tracing;

use crate::error::RelayError;

/// The part of an s3 upload notification we act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadNotification {
    pub bucket_name: String,
    /// Still percent-encoded, see [decode_object_key]
    pub object_key: String,
}

impl UploadNotification {
    /// Reads the first record of the event. Any further records are ignored.
    pub fn from_s3_event(event: &S3Event) -> Result<Self, RelayError> {
        let record = event.records.first().ok_or(RelayError::EmptyEvent)?;

        if event.records.len() > 1 {
            tracing::warn!(
                skipped = event.records.len() - 1,
                "event contains more than one record, only the first is relayed"
            );
        }

        let bucket_name = record
            .s3
            .bucket
            .name
            .clone()
            .ok_or(RelayError::MissingField("bucket name"))?;
        let object_key = record
            .s3
            .object
            .key
            .clone()
            .ok_or(RelayError::MissingField("object key"))?;

        Ok(Self {
            bucket_name,
            object_key,
        })
    }

    pub fn decoded_key(&self) -> Result<String, RelayError> {
        decode_object_key(&self.object_key).map_err(|source| RelayError::UndecodableKey {
            key: self.object_key.clone(),
            source,
        })
    }
}

/// S3 notifications deliver keys that have been encoded twice.
/// The first pass is a plain percent-decode, the second is a form decode where `+` is a space.
pub fn decode_object_key(key: &str) -> Result<String, std::string::FromUtf8Error> {
    let once = urlencoding::decode(key)?;
    let plus_as_space = once.replace('+', " ");
    let twice = urlencoding::decode(&plus_as_space)?;
    Ok(twice.into_owned())
}

/// The last path segment of the key, used as the upload's file name
pub fn file_name(object_name: &str) -> &str {
    object_name
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("photo.jpg")
}
