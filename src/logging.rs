use crate::cli::Args;
use crate::config::Config;
use crate::constants::DEFAULT_LOG_FILE_NAME;
use crate::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_DIRECTIVE: &str = "league_browser=info";
const DEBUG_DIRECTIVE: &str = "league_browser=debug";

/// Where log lines go for a given invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    FileOnly,
    StdoutAndFile,
}

/// Picks the log target:
/// - Interactive mode: logs only to file
/// - Once mode without debug: logs only to file
/// - Other non-interactive modes: logs to both stdout and file
pub fn log_target(args: &Args) -> LogTarget {
    if !crate::cli::is_noninteractive_mode(args) || (args.once && !args.debug) {
        LogTarget::FileOnly
    } else {
        LogTarget::StdoutAndFile
    }
}

/// Splits a custom log path into directory and file name. Without one the
/// default log directory is used.
pub fn resolve_log_location(custom_log_path: Option<&String>) -> (String, String) {
    match custom_log_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(DEFAULT_LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (
            Config::get_log_dir_path(),
            DEFAULT_LOG_FILE_NAME.to_string(),
        ),
    }
}

fn env_filter(debug: bool) -> Result<EnvFilter, AppError> {
    let directive = if debug {
        DEBUG_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    };
    let directive = directive
        .parse()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Sets up logging configuration for the application.
///
/// Creates the log directory if needed and writes to a daily rolling file.
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub async fn setup_logging(args: &Args) -> Result<(String, WorkerGuard), AppError> {
    let config_log_path = Config::load()
        .await
        .ok()
        .and_then(|config| config.log_file_path);

    let custom_log_path = args.log_file.as_ref().or(config_log_path.as_ref());
    let (log_dir, log_file_name) = resolve_log_location(custom_log_path);

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);

    // The guard must outlive every log call or buffered lines are lost
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(env_filter(args.debug)?);
    let registry = tracing_subscriber::registry().with(file_layer);

    let init_result = match log_target(args) {
        LogTarget::FileOnly => registry.try_init(),
        LogTarget::StdoutAndFile => registry
            .with(
                fmt::Layer::new()
                    .with_writer(stdout)
                    .with_ansi(!args.plain)
                    .with_filter(env_filter(args.debug)?),
            )
            .try_init(),
    };
    init_result.map_err(|e| AppError::log_setup_error(e.to_string()))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}
