use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

const DEFAULT_FILTER: &str = "warn,mull=info";
const DEFAULT_FILE_PATH: &str = "logs/mull.log";

// Keeps the non-blocking writer flushing for the lifetime of the process.
static WORKER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Pretty,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Output {
    Stderr,
    File(PathBuf),
    Both(PathBuf),
}

fn parse_format(raw: Option<&str>) -> Format {
    match raw.unwrap_or("pretty").trim().to_ascii_lowercase().as_str() {
        "json" => Format::Json,
        _ => Format::Pretty,
    }
}

fn parse_file_path(raw: Option<&str>) -> PathBuf {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_PATH))
}

fn parse_output(raw: Option<&str>, file_path: PathBuf) -> Output {
    match raw.unwrap_or("stderr").trim().to_ascii_lowercase().as_str() {
        "file" => Output::File(file_path),
        "both" => Output::Both(file_path),
        _ => Output::Stderr,
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn build_file_writer(path: &Path) -> io::Result<(NonBlocking, WorkerGuard)> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| std::ffi::OsStr::new("mull.log"));

    fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

fn try_init(format: Format, writer: BoxMakeWriter) -> InitResult {
    match format {
        Format::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(writer)
            .try_init(),
        Format::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter())
            .with_writer(writer)
            .try_init(),
    }
}

fn init_with_file(format: Format, path: &Path, include_stderr: bool) -> InitResult {
    match build_file_writer(path) {
        Ok((file_writer, guard)) => {
            let writer = if include_stderr {
                BoxMakeWriter::new(io::stderr.and(file_writer))
            } else {
                BoxMakeWriter::new(file_writer)
            };

            let result = try_init(format, writer);
            if result.is_ok() {
                let _ = WORKER_GUARD.set(guard);
            }
            result
        }
        Err(err) => {
            let (mode, fallback) = if include_stderr {
                ("both", "using stderr only")
            } else {
                ("file", "using stderr instead")
            };
            eprintln!(
                "mull: failed to initialize LOG_OUTPUT={} at '{}': {}; {}",
                mode,
                path.display(),
                err,
                fallback
            );
            try_init(format, BoxMakeWriter::new(io::stderr))
        }
    }
}

/// Installs the global subscriber from LOG_FORMAT, LOG_OUTPUT, LOG_FILE_PATH
/// and RUST_LOG. A writer that cannot be created falls back to stderr; a
/// second call is a no-op.
pub fn init() {
    let format = parse_format(env::var("LOG_FORMAT").ok().as_deref());
    let file_path = parse_file_path(env::var("LOG_FILE_PATH").ok().as_deref());
    let output = parse_output(env::var("LOG_OUTPUT").ok().as_deref(), file_path);

    let result = match output {
        Output::Stderr => try_init(format, BoxMakeWriter::new(io::stderr)),
        Output::File(path) => init_with_file(format, &path, false),
        Output::Both(path) => init_with_file(format, &path, true),
    };

    let _ = result;
}
