use std::sync::Arc;

use anyhow::Context as _;
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use photo_relay_handler::{bot_token, config::Config, context::Context, handler::handler, service};
use relay_entrypoint::RelayEntrypoint;
use telegram_client::TelegramClient;

#[tokio::main]
async fn main() -> Result<(), Error> {
    RelayEntrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    tracing::trace!(environment=%config.environment, stage=%config.stage, "initialized config");

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    let parameter_store = ssm_client::SsmClient::new(aws_sdk_ssm::Client::new(&aws_config));
    let bot_token = bot_token::resolve(
        &parameter_store,
        config.environment,
        &config.stage,
        std::env::var(bot_token::LOCAL_TOKEN_VAR).ok(),
    )
    .await
    .context("could not resolve telegram bot token")?;

    tracing::trace!("resolved bot token");

    let telegram_client = service::telegram::Telegram::new(
        TelegramClient::new(bot_token.as_ref(), &config.telegram_api_url)
            .context("could not build telegram client")?,
    );
    let s3_client = service::s3::S3::new(aws_sdk_s3::Client::new(&aws_config));

    tracing::trace!("initialized clients");

    let shared_ctx = Arc::new(Context::new(config, s3_client, telegram_client));

    let func = service_fn(move |event: LambdaEvent<S3Event>| {
        let ctx = shared_ctx.clone();

        async move { handler(&ctx, event).await }
    });

    run(func).await
}
