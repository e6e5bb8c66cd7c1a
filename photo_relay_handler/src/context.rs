use std::sync::Arc;

use crate::{config::Config, service};

/// Process wide state, built once before the runtime starts polling for events
#[derive(Clone)]
pub struct Context {
    pub config: Config,
    pub s3_client: Arc<service::s3::S3>,
    pub telegram_client: Arc<service::telegram::Telegram>,
}

impl Context {
    pub fn new(
        config: Config,
        s3_client: service::s3::S3,
        telegram_client: service::telegram::Telegram,
    ) -> Self {
        Self {
            config,
            s3_client: Arc::new(s3_client),
            telegram_client: Arc::new(telegram_client),
        }
    }
}
