use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API base URL cannot be empty
/// - API base URL must be a valid URL or domain name
/// - HTTP timeout must be at least one second
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(
    api_base_url: &str,
    log_file_path: &Option<String>,
    http_timeout_seconds: u64,
) -> Result<(), AppError> {
    if api_base_url.trim().is_empty() {
        return Err(AppError::config_error("API base URL cannot be empty"));
    }

    if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
        // Without a scheme it should at least look like a host name
        if !api_base_url.contains('.') && !is_localhost(api_base_url) {
            return Err(AppError::config_error(
                "API base URL must be a valid URL or domain name",
            ));
        }
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// True for `localhost` and `127.0.0.1` hosts, with or without a scheme.
pub fn is_localhost(url: &str) -> bool {
    let host = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    host.starts_with("localhost") || host.starts_with("127.0.0.1")
}

/// Normalizes a base URL for saving.
///
/// Remote hosts get an `https://` scheme (an `http://` one is upgraded),
/// local hosts keep or get `http://`. A trailing `/` is removed.
pub fn normalize_api_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if is_localhost(trimmed) {
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        }
    } else if trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed.trim_start_matches("http://"))
    }
}
