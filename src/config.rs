//! Environment-based configuration for API credentials.
//!
//! All credentials come from the process environment (a `.env` file is
//! honored via `dotenvy`). Missing any required value is a fatal startup
//! error that names every absent variable at once, so the operator fixes
//! the environment in one pass instead of one failure at a time.

use thiserror::Error;

/// Environment variable naming the Zotero library to walk.
pub const ENV_LIBRARY_ID: &str = "ZOTERO_LIBRARY_ID";
/// Environment variable selecting `group` or `user` library addressing.
pub const ENV_LIBRARY_TYPE: &str = "ZOTERO_LIBRARY_TYPE";
/// Environment variable holding the Zotero Web API key.
pub const ENV_ZOTERO_API_KEY: &str = "ZOTERO_API_KEY";
/// Environment variable holding the Anthropic API key.
pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

const DEFAULT_LIBRARY_TYPE: &str = "group";

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required environment variables are absent or empty.
    #[error("missing environment variables: {}", names.join(", "))]
    MissingEnv {
        /// Names of every missing variable, in declaration order.
        names: Vec<String>,
    },
}

/// Resolved credentials and library coordinates for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Numeric Zotero library identifier.
    pub library_id: String,
    /// Library addressing type: `group` (default) or `user`.
    pub library_type: String,
    /// Zotero Web API key.
    pub zotero_api_key: String,
    /// Anthropic API key.
    pub anthropic_api_key: String,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first (best effort;
    /// a missing file is not an error). `ZOTERO_LIBRARY_TYPE` defaults to
    /// `group` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] listing every required variable
    /// that is absent or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Best effort: absence of a .env file falls through to the real env.
        let _ = dotenvy::dotenv();

        let library_id = non_empty_var(ENV_LIBRARY_ID);
        let library_type =
            non_empty_var(ENV_LIBRARY_TYPE).unwrap_or_else(|| DEFAULT_LIBRARY_TYPE.to_string());
        let zotero_api_key = non_empty_var(ENV_ZOTERO_API_KEY);
        let anthropic_api_key = non_empty_var(ENV_ANTHROPIC_API_KEY);

        match (library_id, zotero_api_key, anthropic_api_key) {
            (Some(library_id), Some(zotero_api_key), Some(anthropic_api_key)) => Ok(Self {
                library_id,
                library_type,
                zotero_api_key,
                anthropic_api_key,
            }),
            (library_id, zotero_api_key, anthropic_api_key) => {
                let mut names = Vec::new();
                if library_id.is_none() {
                    names.push(ENV_LIBRARY_ID.to_string());
                }
                if zotero_api_key.is_none() {
                    names.push(ENV_ZOTERO_API_KEY.to_string());
                }
                if anthropic_api_key.is_none() {
                    names.push(ENV_ANTHROPIC_API_KEY.to_string());
                }
                Err(ConfigError::MissingEnv { names })
            }
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
