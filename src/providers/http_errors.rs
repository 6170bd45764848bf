use std::error::Error as StdError;
use std::io::ErrorKind;

use crate::generate::GenerateError;

fn error_chain_has_connection_refused(err: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == ErrorKind::ConnectionRefused
        {
            return true;
        }

        if source
            .to_string()
            .to_ascii_lowercase()
            .contains("connection refused")
        {
            return true;
        }

        current = source.source();
    }

    false
}

fn error_chain_has_timeout(err: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == ErrorKind::TimedOut
        {
            return true;
        }

        if source
            .to_string()
            .to_ascii_lowercase()
            .contains("timed out")
        {
            return true;
        }

        current = source.source();
    }

    false
}

/// Classifies a transport failure into the generation error taxonomy.
/// Recognized causes become provider errors with actionable messages;
/// anything else is reported through the unknown path.
pub(crate) fn generation_api_request_error(err: reqwest::Error, api_url: &str) -> GenerateError {
    if err.is_timeout() || error_chain_has_timeout(&err) {
        return GenerateError::provider(format!(
            "Model request timed out while calling '{}'. \
             Check network connectivity and provider status.",
            api_url
        ));
    }

    if err.is_connect() {
        if error_chain_has_connection_refused(&err) {
            return GenerateError::provider(format!(
                "Connection refused by generation API at '{}'. \
                 Ensure GEMINI_BASE_URL points at a reachable endpoint.",
                api_url
            ));
        }

        return GenerateError::provider(format!(
            "Failed to connect to generation API at '{}'. \
             Check GEMINI_BASE_URL and network connectivity.",
            api_url
        ));
    }

    GenerateError::unknown(format!("Failed to call generation API at '{}': {}", api_url, err))
}
