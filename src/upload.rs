//! MyFinance bank-statement upload client.
//!
//! One authenticated multipart POST per run. The client reports success or
//! failure as a typed result; deciding what to do with the local file is
//! the caller's job.

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::blocking::{multipart, Client};
use std::path::Path;

/// Production MyFinance API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://app.myfinance.com.br";

/// Client for the MyFinance bank-statement endpoint.
#[derive(Debug)]
pub struct UploadClient {
    config: Config,
    base_url: String,
    client: Client,
}

impl UploadClient {
    /// Create a client against the production endpoint.
    pub fn new(config: Config) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a client against an alternate endpoint.
    pub fn with_base_url(config: Config, base_url: impl Into<String>) -> Self {
        UploadClient {
            config,
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// URL of the bank-statements endpoint for the configured entity and
    /// deposit account.
    pub fn statements_url(&self) -> String {
        format!(
            "{}/entities/{}/deposit_accounts/{}/bank_statements",
            self.base_url, self.config.entity, self.config.deposit_account
        )
    }

    /// Upload a statement file as `bank_statement[file]` multipart form
    /// data. The token is sent as the basic-auth username with the literal
    /// password `X`, and the account identifier in an `ACCOUNT_ID` header.
    pub fn upload_statement(&self, path: &Path) -> Result<()> {
        let form = multipart::Form::new().file("bank_statement[file]", path)?;

        let response = self
            .client
            .post(self.statements_url())
            .basic_auth(&self.config.token, Some("X"))
            .header("ACCOUNT_ID", &self.config.account_id)
            .multipart(form)
            .send()?;

        if !response.status().is_success() {
            return Err(Error::Upload(format!(
                "server returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
