//! Relays photos uploaded to s3 into the telegram chat encoded in their file name.
pub mod bot_token;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod model;
pub mod service;

#[cfg(test)]
mod test_support {
    use aws_lambda_events::event::s3::S3Event;

    /// A real put notification with one record per key
    pub fn s3_event(keys: &[&str]) -> S3Event {
        let mut event: S3Event =
            serde_json::from_str(include_str!("fixtures/s3_put_event.json")).unwrap();
        let template = event.records.remove(0);

        event.records = keys
            .iter()
            .map(|key| {
                let mut record = template.clone();
                record.s3.object.key = Some(key.to_string());
                record
            })
            .collect();

        event
    }
}
