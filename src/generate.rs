use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, Mode};
use crate::providers;

/// Failure modes of a single generation call.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(
        "GEMINI_API_KEY is not set. Export it or add it to a .env file before submitting a prompt."
    )]
    MissingCredential,

    #[error("{0}")]
    Provider(String),

    #[error("Unexpected failure while generating a response: {0}")]
    Unknown(String),
}

impl GenerateError {
    pub(crate) fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub(crate) fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }
}

/// Runs one generation round-trip: pick the model for `mode`, attach the
/// deep-mode configuration when asked for, await the single network call.
pub async fn generate(
    client: &Client,
    cfg: &Config,
    prompt: &str,
    mode: Mode,
) -> Result<String, GenerateError> {
    let Some(api_key) = cfg.api_key.as_deref() else {
        return Err(GenerateError::MissingCredential);
    };

    debug!(
        mode = mode.as_str(),
        model = cfg.model_for(mode),
        prompt_len = prompt.len(),
        "dispatching generation request"
    );
    providers::gemini::generate_content(client, cfg, api_key, prompt, mode).await
}
