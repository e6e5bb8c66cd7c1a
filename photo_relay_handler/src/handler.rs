use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};

use crate::{
    context::Context,
    error::RelayError,
    model::{DeliveryMetadata, UploadNotification, notification},
};

/// Handles the s3 upload event
#[tracing::instrument(skip(ctx, event), fields(request_id = %event.context.request_id))]
pub async fn handler(ctx: &Context, event: LambdaEvent<S3Event>) -> Result<(), Error> {
    relay(ctx, &event.payload).await.map_err(|err| {
        tracing::error!(error=?err, "unable to relay photo");
        Error::from(err)
    })
}

/// Decodes the key, parses delivery metadata, downloads the photo and posts it to the chat.
/// The send is awaited so a failed delivery fails the invocation.
pub async fn relay(ctx: &Context, event: &S3Event) -> Result<(), RelayError> {
    tracing::info!(record_count = event.records.len(), "processing s3 event");

    let upload = UploadNotification::from_s3_event(event)?;
    let object_name = upload.decoded_key()?;
    tracing::info!(object_name=%object_name, bucket=%upload.bucket_name, "decoded object key");

    // parse before downloading so a bad name costs nothing
    let metadata = DeliveryMetadata::from_object_name(&object_name).map_err(|reason| {
        RelayError::MalformedKey {
            key: object_name.clone(),
            reason,
        }
    })?;

    let bucket = ctx.config.destination_bucket.as_str();
    if upload.bucket_name != bucket {
        tracing::warn!(
            event_bucket=%upload.bucket_name,
            destination_bucket=%bucket,
            "event bucket differs from the destination bucket, reading from the destination bucket"
        );
    }

    tracing::info!("downloading photo");
    let photo = ctx
        .s3_client
        .get_object_bytes(bucket, &object_name)
        .await
        .map_err(|source| RelayError::FetchFailure {
            bucket: bucket.to_string(),
            key: object_name.clone(),
            source,
        })?;

    tracing::info!(chat_id=%metadata.chat_id, "reposting photo to chat");
    let message = ctx
        .telegram_client
        .send_photo(
            &metadata.chat_id,
            photo,
            notification::file_name(&object_name),
            &metadata.caption(),
        )
        .await
        .map_err(|source| RelayError::SendFailure {
            chat_id: metadata.chat_id.clone(),
            source,
        })?;

    tracing::info!(message_id = message.message_id, chat_id=%metadata.chat_id, "photo delivered");

    Ok(())
}
