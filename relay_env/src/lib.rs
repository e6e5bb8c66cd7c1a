#![deny(missing_docs)]
//! This crate provides a typed utility for determining what environment we are in at runtime,
//! along with the helpers used to read environment variables with useful errors.

use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The name of the environment variable which selects the [Environment]
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// The error produced when an environment variable cannot be read
#[derive(Debug, Error)]
#[error("An error occurred while reading envvar: {var_name}. Err: {err}")]
pub struct VarNameErr {
    var_name: &'static str,
    err: std::env::VarError,
}

impl VarNameErr {
    /// create a new [VarNameErr] for the given variable
    pub fn new(var_name: &'static str, err: std::env::VarError) -> Self {
        Self { var_name, err }
    }
}

/// read `var_name` from the process environment
pub fn read_env(var_name: &'static str) -> Result<String, VarNameErr> {
    std::env::var(var_name).map_err(|err| VarNameErr::new(var_name, err))
}

/// The current environment the lambda is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// Running on a developer machine, secrets come from the local env
    Local,
}

/// An error which can occur when constructing an [Environment]
#[derive(Debug, Error)]
pub enum EnvErr {
    /// A std::env::var error while reading an env var
    #[error("{0}")]
    VarErr(#[from] VarNameErr),
    /// the input string value was not recognized as a valid env
    #[error("{0}")]
    InvalidValue(#[from] UnknownValue),
}

impl Environment {
    /// Attempt to construct a new version of [Environment] from the environment variables
    #[tracing::instrument(err, level = tracing::Level::TRACE)]
    pub fn new_from_env() -> Result<Self, EnvErr> {
        let v = read_env(ENVIRONMENT_VAR)?;
        Ok(Self::from_str(&v)?)
    }

    /// attempt to create a new [Environment] falling back to production if we fail to construct
    pub fn new_or_prod() -> Self {
        Self::new_from_env().unwrap_or(Environment::Production)
    }

    /// true when secrets should be read from a remote store rather than the local env
    pub fn is_deployed(&self) -> bool {
        !matches!(self, Environment::Local)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error)]
#[error("Could not convert {0} into an environment value")]
pub struct UnknownValue(String);

impl FromStr for Environment {
    type Err = UnknownValue;

    fn from_str(environment: &str) -> Result<Self, UnknownValue> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownValue(s.to_string())),
        }
    }
}
