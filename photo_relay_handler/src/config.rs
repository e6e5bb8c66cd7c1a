use anyhow::Context;
use relay_env::{Environment, VarNameErr};
use std::env::VarError;

/// The configuration parameters for the lambda.
///
/// These are pulled from environment variables set on the function.
/// See `.env.sample` in the photo_relay_handler root for details.
#[derive(Debug, Clone)]
pub struct Config {
    /// The bucket uploaded photos are read from
    pub destination_bucket: String,

    /// The deployment stage, selects which ssm path the bot token is read from
    pub stage: String,

    /// Base url of the telegram bot api
    pub telegram_api_url: String,

    /// The environment we are in
    pub environment: Environment,
}

impl Config {
    pub fn new(destination_bucket: &str, stage: &str, environment: Environment) -> Self {
        Config {
            destination_bucket: destination_bucket.to_string(),
            stage: stage.to_string(),
            telegram_api_url: telegram_client::DEFAULT_API_URL.to_string(),
            environment,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|name| std::env::var(name))
    }

    /// Build the config from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&'static str) -> Result<String, VarError>,
    {
        let require = |name: &'static str| lookup(name).map_err(|err| VarNameErr::new(name, err));

        let destination_bucket = require("DESTINATION_BUCKET_NAME")
            .context("DESTINATION_BUCKET_NAME must be provided")?;
        let stage = require("STAGE").context("STAGE must be provided")?;

        let environment = match lookup(relay_env::ENVIRONMENT_VAR) {
            Ok(value) => value
                .parse::<Environment>()
                .context("ENVIRONMENT is not recognized")?,
            Err(_) => Environment::Production,
        };

        let mut config = Config::new(&destination_bucket, &stage, environment);
        if let Ok(url) = lookup("TELEGRAM_API_URL") {
            config.telegram_api_url = url;
        }

        Ok(config)
    }
}
