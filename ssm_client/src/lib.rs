#![deny(missing_docs)]
//! Reads secure parameters from AWS Systems Manager Parameter Store.
//!
//! [ParameterStore] abstracts the remote store so callers can resolve a secret either from the
//! local env (when running on a developer machine) or from SSM (when deployed).
use std::sync::Arc;

use aws_sdk_ssm as ssm;
use relay_env::Environment;
use thiserror::Error;

/// a trait to abstract away the expected interface for fetching a parameter from a remote store
pub trait ParameterStore: Send + Sync {
    /// The error that can be returned from the store
    type Err: std::error::Error;

    /// fetch the parameter `name` from the store, decrypting SecureString values when `with_decryption` is set
    fn get_parameter<T: AsRef<str> + Send>(
        &self,
        name: T,
        with_decryption: bool,
    ) -> impl Future<Output = Result<Arc<str>, Self::Err>> + Send;

    /// if we are in local mode, return `var` as the secret itself,
    /// if we are in dev or production read the decrypted parameter whose name is `var`
    #[tracing::instrument(err, skip(self, var), fields(self = %std::any::type_name_of_val(self)))]
    fn get_maybe_secret_value<T: AsRef<str> + Send>(
        &self,
        environment: Environment,
        var: T,
    ) -> impl Future<Output = Result<LocalOrRemoteSecret<T>, Self::Err>> + Send {
        async move {
            match environment {
                Environment::Local => Ok(LocalOrRemoteSecret::Local(var)),
                Environment::Production | Environment::Develop => Ok(LocalOrRemoteSecret::Remote(
                    self.get_parameter(var, true).await?,
                )),
            }
        }
    }
}

/// [ParameterStore] backed by the AWS SSM api
#[derive(Clone, Debug)]
pub struct SsmClient {
    inner: ssm::Client,
}

/// An error returned by [SsmClient]
#[derive(Debug, Error)]
pub enum ParameterErr {
    /// the sdk call failed
    #[error("{0:?}")]
    AwsErr(#[from] Box<ssm::Error>),
    /// the parameter exists but carries no value
    #[error("The parameter did not have a value in aws")]
    NotPresent,
}

impl SsmClient {
    /// wrap an sdk client
    pub fn new(inner: ssm::Client) -> Self {
        Self { inner }
    }
}

impl ParameterStore for SsmClient {
    type Err = ParameterErr;

    #[tracing::instrument(err, skip(self, name), fields(name = %name.as_ref()))]
    async fn get_parameter<T: AsRef<str> + Send>(
        &self,
        name: T,
        with_decryption: bool,
    ) -> Result<Arc<str>, ParameterErr> {
        let result = self
            .inner
            .get_parameter()
            .name(name.as_ref())
            .with_decryption(with_decryption)
            .send()
            .await
            .map_err(|e| Box::new(ssm::Error::from(e)))?;

        if let Some(value) = result.parameter().and_then(|parameter| parameter.value()) {
            return Ok(Arc::from(value));
        }

        Err(ParameterErr::NotPresent)
    }
}

/// the [ParameterStore::Err] type for [NullParameterStore]
#[derive(Debug, Error)]
#[error("Not implemented")]
pub struct NotImplemented;

/// testing struct which implements [ParameterStore]
/// this will always fail with [NotImplemented]
pub struct NullParameterStore;

impl ParameterStore for NullParameterStore {
    type Err = NotImplemented;

    async fn get_parameter<T: AsRef<str> + Send>(
        &self,
        _name: T,
        _with_decryption: bool,
    ) -> Result<Arc<str>, Self::Err> {
        Err(NotImplemented)
    }
}

/// A secret that is either derived from the local environment or from something that implements [ParameterStore]
#[derive(Clone)]
pub enum LocalOrRemoteSecret<T> {
    /// the secret is from the local env
    Local(T),
    /// the secret is from ssm
    Remote(Arc<str>),
}

impl<T> std::fmt::Debug for LocalOrRemoteSecret<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalOrRemoteSecret::Local(_) => f.write_str("Local(<redacted>)"),
            LocalOrRemoteSecret::Remote(_) => f.write_str("Remote(<redacted>)"),
        }
    }
}

impl<T> AsRef<str> for LocalOrRemoteSecret<T>
where
    T: AsRef<str>,
{
    fn as_ref(&self) -> &str {
        match self {
            LocalOrRemoteSecret::Local(s) => s.as_ref(),
            LocalOrRemoteSecret::Remote(s) => s,
        }
    }
}
