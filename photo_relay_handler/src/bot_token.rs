use anyhow::Context;
use lambda_runtime::tracing;
use relay_env::Environment;
use ssm_client::{LocalOrRemoteSecret, ParameterStore};

/// Env var holding the bot token when running locally
pub const LOCAL_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// The ssm parameter holding the bot token for `stage`
pub fn bot_token_parameter(stage: &str) -> String {
    format!("/telegramtasweerbot/telegram/{stage}/bot_token")
}

/// Resolve the bot token once for the lifetime of the process.
/// Locally the token is `local_token`, deployed stages read the encrypted ssm parameter.
#[tracing::instrument(skip(store, local_token))]
pub async fn resolve<S>(
    store: &S,
    environment: Environment,
    stage: &str,
    local_token: Option<String>,
) -> anyhow::Result<LocalOrRemoteSecret<String>>
where
    S: ParameterStore,
    S::Err: Send + Sync + 'static,
{
    let var = if environment.is_deployed() {
        bot_token_parameter(stage)
    } else {
        local_token.with_context(|| format!("{LOCAL_TOKEN_VAR} must be provided locally"))?
    };

    let token = store
        .get_maybe_secret_value(environment, var)
        .await
        .context("unable to read bot token")?;

    if token.as_ref().is_empty() {
        anyhow::bail!("bot token is empty");
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssm_client::NullParameterStore;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingStore {
        requests: Mutex<Vec<(String, bool)>>,
    }

    impl ParameterStore for RecordingStore {
        type Err = std::convert::Infallible;

        async fn get_parameter<T: AsRef<str> + Send>(
            &self,
            name: T,
            with_decryption: bool,
        ) -> Result<Arc<str>, Self::Err> {
            self.requests
                .lock()
                .unwrap()
                .push((name.as_ref().to_string(), with_decryption));
            Ok(Arc::from("123:remote"))
        }
    }

    #[test]
    fn parameter_path_includes_stage() {
        assert_eq!(
            bot_token_parameter("prod"),
            "/telegramtasweerbot/telegram/prod/bot_token"
        );
    }

    #[tokio::test]
    async fn deployed_reads_decrypted_stage_parameter() {
        let store = RecordingStore::default();

        let token = resolve(&store, Environment::Production, "prod", None)
            .await
            .unwrap();

        assert_eq!(token.as_ref(), "123:remote");
        assert_eq!(
            *store.requests.lock().unwrap(),
            vec![(
                "/telegramtasweerbot/telegram/prod/bot_token".to_string(),
                true
            )]
        );
    }

    #[tokio::test]
    async fn local_uses_env_token_without_store() {
        let token = resolve(
            &NullParameterStore,
            Environment::Local,
            "dev",
            Some("123:local".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(token.as_ref(), "123:local");
    }

    #[tokio::test]
    async fn local_without_token_fails() {
        let result = resolve(&NullParameterStore, Environment::Local, "dev", None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn store_failure_fails_startup() {
        let result = resolve(&NullParameterStore, Environment::Develop, "dev", None).await;
        assert!(result.is_err());
    }
}
