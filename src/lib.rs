pub mod config;
pub mod gateway;
pub mod generate;
pub mod logging;
pub mod providers;
pub mod repl;
pub mod session;

use anyhow::{Context, Result};
use reqwest::Client;
use std::env;
use tracing::info;

use config::{Config, Mode};
use repl::run_repl;

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cfg = Config::from_env();
    info!(
        fast_model = %cfg.fast_model,
        deep_model = %cfg.deep_model,
        base_url = %cfg.base_url,
        start_mode = cfg.start_mode.as_str(),
        "loaded runtime configuration"
    );

    let client = Client::builder()
        .build()
        .context("Failed to initialize HTTP client")?;

    let mut mode = cfg.start_mode;
    let mut prompt_parts: Vec<String> = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--deep" => mode = Mode::Deep,
            "--fast" => mode = Mode::Fast,
            _ => prompt_parts.push(arg),
        }
    }

    if prompt_parts.is_empty() {
        run_repl(&client, &cfg, mode).await
    } else {
        let prompt = prompt_parts.join(" ");
        let answer = generate::generate(&client, &cfg, &prompt, mode).await?;
        println!("{}", answer.trim());
        Ok(())
    }
}
