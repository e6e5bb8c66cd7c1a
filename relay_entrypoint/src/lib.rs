#![deny(missing_docs)]
//! Standardized process initialization for the relay binaries.
//! Loads a `.env` file when present, installs the panic hook and picks a tracing format for the environment.

use relay_env::Environment;
use tracing_subscriber::EnvFilter;

/// defines the behaviour for instantiation
#[derive(Debug)]
pub struct RelayEntrypoint {
    env: Environment,
}

impl Default for RelayEntrypoint {
    fn default() -> Self {
        // the .env file may be what sets ENVIRONMENT locally
        dotenv::dotenv().ok();
        RelayEntrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// sentinel struct which guarantees that we called [RelayEntrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl RelayEntrypoint {
    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            // cloudwatch stamps ingestion time itself
            Environment::Production | Environment::Develop => {
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .without_time()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        tracing::trace!(environment=%self.env, "initialized entrypoint");

        InitializedEntrypoint(())
    }
}
