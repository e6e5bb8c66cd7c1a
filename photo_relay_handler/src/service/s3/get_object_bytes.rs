use anyhow::{Context, Result};
use aws_sdk_s3 as s3;
use lambda_runtime::tracing;

#[tracing::instrument(skip(client))]
pub async fn get_object_bytes(client: &s3::Client, bucket: &str, key: &str) -> Result<Vec<u8>> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(s3::Error::from)
        .context("get object")?;

    let body = resp.body.collect().await.context("read object body")?;
    let bytes = body.into_bytes().to_vec();

    tracing::trace!(len = bytes.len(), "downloaded object");

    Ok(bytes)
}
