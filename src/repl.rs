use anyhow::{Context, Result};
use reqwest::Client;
use std::io::{self, BufRead, Write};

use crate::config::{Config, Mode};
use crate::gateway::{GenerateGateway, GenerateRequest, HostGateway};
use crate::session::{Phase, Session};

pub async fn run_repl(client: &Client, cfg: &Config, start_mode: Mode) -> Result<()> {
    let gateway = HostGateway::new(client, cfg);
    let mut session = Session::new(start_mode);

    println!("mull: Gemini from your terminal");
    println!("mode: {}", mode_label(cfg, session.mode()));
    println!(
        "type a prompt and press Enter to submit; end a line with '\\' to insert a line break"
    );
    println!("commands: '/mode' to toggle fast/deep, '/fast', '/deep', 'exit' to quit");

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(input) = read_submission(&mut io::stdin().lock())? else {
            break;
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        if trimmed.eq_ignore_ascii_case("/mode") {
            session.toggle_mode();
            println!("mode: {}\n", mode_label(cfg, session.mode()));
            continue;
        }
        if trimmed.eq_ignore_ascii_case("/fast") {
            session.set_mode(Mode::Fast);
            println!("mode: {}\n", mode_label(cfg, session.mode()));
            continue;
        }
        if trimmed.eq_ignore_ascii_case("/deep") {
            session.set_mode(Mode::Deep);
            println!("mode: {}\n", mode_label(cfg, session.mode()));
            continue;
        }

        if let Some(prompt) = session.try_submit(&input) {
            println!("({})", busy_notice(session.mode()));
            let request = GenerateRequest {
                prompt,
                mode: session.mode(),
            };
            match gateway.generate(request).await {
                Ok(response) => session.settle_answer(response.text),
                Err(err) => session.settle_failure(err.to_string()),
            }
            render_outcome(session.phase());
        }
    }

    Ok(())
}

/// Reads one logical submission. A line ending in '\' drops the backslash,
/// keeps a literal line break, and continues reading. Returns `None` on EOF
/// before any input.
fn read_submission(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut submission = String::new();

    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line).context("Failed to read stdin")?;
        if read == 0 {
            if submission.is_empty() {
                return Ok(None);
            }
            return Ok(Some(submission));
        }

        let line = line.trim_end_matches(['\r', '\n']);
        match continuation_head(line) {
            Some(head) => {
                submission.push_str(head);
                submission.push('\n');
                print!("… ");
                io::stdout().flush().context("Failed to flush stdout")?;
            }
            None => {
                submission.push_str(line);
                return Ok(Some(submission));
            }
        }
    }
}

fn continuation_head(line: &str) -> Option<&str> {
    line.strip_suffix('\\')
}

fn mode_label(cfg: &Config, mode: Mode) -> String {
    format!("{} ({})", mode.as_str(), cfg.model_for(mode))
}

fn busy_notice(mode: Mode) -> &'static str {
    match mode {
        Mode::Deep => "thinking deeply...",
        Mode::Fast => "generating response...",
    }
}

fn render_outcome(phase: &Phase) {
    match phase {
        Phase::Answered(text) => println!("{}\n", text.trim()),
        Phase::Failed(message) => eprintln!("error: {message}\n"),
        Phase::Idle | Phase::Submitting => {}
    }
}
