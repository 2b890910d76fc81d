//! MyFinance API configuration.
//!
//! Credentials come from the process environment and are only ever handed
//! to the upload client; extraction and encoding never see them.

use crate::error::{Error, Result};

/// Environment variables the importer requires.
pub const REQUIRED_VARS: &[&str] = &[
    "MYFINANCE_ACCOUNT_ID",
    "MYFINANCE_ENTITY",
    "MYFINANCE_DEPOSIT_ACCOUNT",
    "MYFINANCE_TOKEN",
];

/// MyFinance API credentials and identifiers, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Account identifier sent in the `ACCOUNT_ID` header.
    pub account_id: String,

    /// Entity identifier in the upload URL.
    pub entity: String,

    /// Deposit account identifier in the upload URL.
    pub deposit_account: String,

    /// API access token, used as the basic-auth username.
    pub token: String,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// All four variables in [`REQUIRED_VARS`] must be set; the error lists
    /// every missing one.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key/value lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .filter(|key| lookup(key).map_or(true, |v| v.is_empty()))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingCredentials(missing.join(", ")));
        }

        let get = |key: &str| lookup(key).unwrap_or_default();
        Ok(Config {
            account_id: get("MYFINANCE_ACCOUNT_ID"),
            entity: get("MYFINANCE_ENTITY"),
            deposit_account: get("MYFINANCE_DEPOSIT_ACCOUNT"),
            token: get("MYFINANCE_TOKEN"),
        })
    }
}
