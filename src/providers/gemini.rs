use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{Config, Mode};
use crate::generate::GenerateError;
use crate::providers::http_errors::generation_api_request_error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Instruction<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

/// System instruction content; the API accepts it without a role.
#[derive(Debug, Serialize)]
struct Instruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Endpoint path for a model, without the credential query parameter so the
/// value is safe to log.
fn endpoint(base_url: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

fn build_request<'a>(cfg: &'a Config, prompt: &'a str, mode: Mode) -> GenerateContentRequest<'a> {
    let contents = vec![Content {
        role: "user",
        parts: vec![Part { text: prompt }],
    }];

    match mode {
        Mode::Fast => GenerateContentRequest {
            contents,
            system_instruction: None,
            generation_config: None,
        },
        Mode::Deep => GenerateContentRequest {
            contents,
            system_instruction: Some(Instruction {
                parts: vec![Part {
                    text: &cfg.deep_system_prompt,
                }],
            }),
            generation_config: Some(GenerationConfig {
                thinking_config: ThinkingConfig {
                    thinking_budget: cfg.thinking_budget,
                },
            }),
        },
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, GenerateError> {
    let first_candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerateError::provider("Model returned no candidates"))?;

    let text = first_candidate
        .content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        return Err(GenerateError::provider("Model returned an empty response"));
    }
    Ok(text)
}

pub(crate) async fn generate_content(
    client: &Client,
    cfg: &Config,
    api_key: &str,
    prompt: &str,
    mode: Mode,
) -> Result<String, GenerateError> {
    let model = cfg.model_for(mode);
    let api_url = endpoint(&cfg.base_url, model);
    let body = build_request(cfg, prompt, mode);
    debug!(
        api_url = %api_url,
        model = %model,
        mode = mode.as_str(),
        "sending generateContent request"
    );

    let response = client
        .post(&api_url)
        .query(&[("key", api_key)])
        .json(&body)
        .send()
        .await
        .map_err(|err| {
            warn!(
                api_url = %api_url,
                model = %model,
                error = %err,
                "generateContent request failed"
            );
            generation_api_request_error(err, &api_url)
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let response_body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read response body>".to_string());
        warn!(
            api_url = %api_url,
            model = %model,
            status = %status,
            response_body_len = response_body.len(),
            "generateContent returned non-success status"
        );
        return Err(GenerateError::provider(format!(
            "Model request failed with status {}: {}",
            status, response_body
        )));
    }

    let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
        GenerateError::provider(format!("Failed to parse generateContent response: {err}"))
    })?;

    let text = extract_text(parsed)?;
    debug!(
        model = %model,
        response_len = text.len(),
        "received generateContent response"
    );
    Ok(text)
}
