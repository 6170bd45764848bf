use std::env;

const DEFAULT_FAST_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_DEEP_MODEL: &str = "gemini-2.5-pro";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_THINKING_BUDGET: u32 = 32768;
const DEFAULT_DEEP_SYSTEM_PROMPT: &str = "You are an advanced AI assistant with exceptional analytical and creative skills. Take your time to think carefully before responding. Consider multiple perspectives, analyze potential implications, and provide a clear, structured, and detailed answer. If the question is complex, break it down into smaller parts, explain your reasoning step by step, and explore alternative solutions or interpretations. Always prioritize accuracy, logic, and depth in your responses.";

/// Response mode selected by the user. `Deep` routes to the pro-tier model
/// with the deep system instruction and a thinking budget attached; `Fast`
/// routes to the flash-tier model with no extra configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Fast,
    Deep,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Deep => "deep",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Fast => Self::Deep,
            Self::Deep => Self::Fast,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the generation API. Captured once at startup; a
    /// missing or blank value is surfaced as a configuration error when a
    /// generation is attempted, not at load time.
    pub api_key: Option<String>,
    pub fast_model: String,
    pub deep_model: String,
    pub base_url: String,
    pub thinking_budget: u32,
    pub deep_system_prompt: String,
    pub start_mode: Mode,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            api_key: parse_api_key(get_var("GEMINI_API_KEY")),
            fast_model: string_or_default(get_var("FAST_MODEL"), DEFAULT_FAST_MODEL),
            deep_model: string_or_default(get_var("DEEP_MODEL"), DEFAULT_DEEP_MODEL),
            base_url: string_or_default(get_var("GEMINI_BASE_URL"), DEFAULT_BASE_URL),
            thinking_budget: parse_thinking_budget(get_var("THINKING_BUDGET").as_deref()),
            deep_system_prompt: string_or_default(
                get_var("DEEP_SYSTEM_PROMPT"),
                DEFAULT_DEEP_SYSTEM_PROMPT,
            ),
            start_mode: parse_mode(get_var("START_MODE").as_deref()),
        }
    }

    pub fn model_for(&self, mode: Mode) -> &str {
        match mode {
            Mode::Fast => &self.fast_model,
            Mode::Deep => &self.deep_model,
        }
    }
}

fn parse_api_key(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn string_or_default(raw: Option<String>, default: &str) -> String {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_thinking_budget(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_THINKING_BUDGET)
}

fn parse_mode(raw: Option<&str>) -> Mode {
    match raw.unwrap_or("fast").trim().to_ascii_lowercase().as_str() {
        "deep" => Mode::Deep,
        _ => Mode::Fast,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{
        Config, DEFAULT_BASE_URL, DEFAULT_DEEP_MODEL, DEFAULT_DEEP_SYSTEM_PROMPT,
        DEFAULT_FAST_MODEL, DEFAULT_THINKING_BUDGET, Mode, parse_api_key, parse_mode,
        parse_thinking_budget,
    };

    fn config_from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Config::from_env_with(|key| vars.get(key).cloned())
    }

    #[test]
    fn from_env_uses_defaults_when_vars_are_missing() {
        let cfg = config_from_pairs(&[]);
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.fast_model, DEFAULT_FAST_MODEL);
        assert_eq!(cfg.deep_model, DEFAULT_DEEP_MODEL);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.thinking_budget, DEFAULT_THINKING_BUDGET);
        assert_eq!(cfg.deep_system_prompt, DEFAULT_DEEP_SYSTEM_PROMPT);
        assert_eq!(cfg.start_mode, Mode::Fast);
    }

    #[test]
    fn from_env_reads_configured_values() {
        let cfg = config_from_pairs(&[
            ("GEMINI_API_KEY", "secret-key"),
            ("FAST_MODEL", "gemini-2.0-flash"),
            ("DEEP_MODEL", "gemini-exp"),
            ("GEMINI_BASE_URL", "http://localhost:9999"),
            ("THINKING_BUDGET", "1024"),
            ("DEEP_SYSTEM_PROMPT", "Reason step by step."),
            ("START_MODE", "deep"),
        ]);

        assert_eq!(cfg.api_key.as_deref(), Some("secret-key"));
        assert_eq!(cfg.fast_model, "gemini-2.0-flash");
        assert_eq!(cfg.deep_model, "gemini-exp");
        assert_eq!(cfg.base_url, "http://localhost:9999");
        assert_eq!(cfg.thinking_budget, 1024);
        assert_eq!(cfg.deep_system_prompt, "Reason step by step.");
        assert_eq!(cfg.start_mode, Mode::Deep);
    }

    #[test]
    fn blank_values_never_override_defaults() {
        let cfg = config_from_pairs(&[
            ("GEMINI_API_KEY", "   "),
            ("FAST_MODEL", ""),
            ("GEMINI_BASE_URL", "  "),
        ]);

        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.fast_model, DEFAULT_FAST_MODEL);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn model_for_maps_modes_to_identifiers() {
        let cfg = config_from_pairs(&[]);
        assert_eq!(cfg.model_for(Mode::Fast), DEFAULT_FAST_MODEL);
        assert_eq!(cfg.model_for(Mode::Deep), DEFAULT_DEEP_MODEL);
    }

    #[test]
    fn parse_api_key_trims_and_rejects_blank_values() {
        assert_eq!(parse_api_key(Some(" key ".to_string())), Some("key".to_string()));
        assert_eq!(parse_api_key(Some("  ".to_string())), None);
        assert_eq!(parse_api_key(None), None);
    }

    #[test]
    fn parse_thinking_budget_uses_default_for_missing_or_invalid_values() {
        assert_eq!(parse_thinking_budget(None), DEFAULT_THINKING_BUDGET);
        assert_eq!(parse_thinking_budget(Some("")), DEFAULT_THINKING_BUDGET);
        assert_eq!(
            parse_thinking_budget(Some("not-a-number")),
            DEFAULT_THINKING_BUDGET
        );
        assert_eq!(parse_thinking_budget(Some("0")), DEFAULT_THINKING_BUDGET);
        assert_eq!(parse_thinking_budget(Some("-1")), DEFAULT_THINKING_BUDGET);
    }

    #[test]
    fn parse_thinking_budget_accepts_positive_integer() {
        assert_eq!(parse_thinking_budget(Some("4096")), 4096);
        assert_eq!(parse_thinking_budget(Some("  128  ")), 128);
    }

    #[test]
    fn parse_mode_defaults_to_fast_and_accepts_deep() {
        assert_eq!(parse_mode(None), Mode::Fast);
        assert_eq!(parse_mode(Some("unknown")), Mode::Fast);
        assert_eq!(parse_mode(Some(" DEEP ")), Mode::Deep);
    }

    #[test]
    fn mode_toggles_between_variants() {
        assert_eq!(Mode::Fast.toggled(), Mode::Deep);
        assert_eq!(Mode::Deep.toggled(), Mode::Fast);
    }
}
