//! Client configuration sourced from the environment.

use std::env;

use crate::error::{Error, Result};

/// Base URL used when `LABEL_STUDIO_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection settings for the labeling platform.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, without a trailing `/api`.
    pub base_url: String,
    /// API token sent as `Authorization: Token <key>`.
    pub api_key: String,
}

impl ClientConfig {
    /// Read `LABEL_STUDIO_URL` and `LABEL_STUDIO_API_KEY` from the
    /// environment, honoring a `.env` file in the working directory.
    ///
    /// Only the project subcommands need this; the merge path never does.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let base_url =
            env::var("LABEL_STUDIO_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = env::var("LABEL_STUDIO_API_KEY").map_err(|_| {
            Error::config(
                "LABEL_STUDIO_API_KEY environment variable not set. \
                 Set it in your environment or .env file.",
            )
        })?;
        Ok(Self { base_url, api_key })
    }
}
