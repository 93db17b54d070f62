use std::{env::VarError, fmt::Debug};

use derive_more::{AsRef, Display, From};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

pub const EMAIL_VAR: &str = "EMAIL";
pub const PASSWORD_VAR: &str = "PASSWORD";

#[derive(Debug, TypedBuilder, Serialize, Deserialize)]
pub struct Credentials {
    pub email: Email,
    pub password: Password,
}

#[derive(Debug, From, AsRef, Display, Serialize, Deserialize)]
pub struct Email(String);

#[derive(From, AsRef, Serialize, Deserialize)]
pub struct Password(String);
impl Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(..)")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("{0} is not set in the environment")]
    Missing(&'static str),
    #[error("{0} is set but is not valid unicode")]
    NotUnicode(&'static str),
}

impl Credentials {
    /// Reads `EMAIL` and `PASSWORD` from the process environment.
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// An empty value counts as missing.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Result<String, VarError>,
    ) -> Result<Self, CredentialsError> {
        let fetch = |key: &'static str| match lookup(key) {
            Ok(value) if !value.is_empty() => Ok(value),
            Ok(_) | Err(VarError::NotPresent) => Err(CredentialsError::Missing(key)),
            Err(VarError::NotUnicode(_)) => Err(CredentialsError::NotUnicode(key)),
        };
        Ok(Self {
            email: fetch(EMAIL_VAR)?.into(),
            password: fetch(PASSWORD_VAR)?.into(),
        })
    }
}
