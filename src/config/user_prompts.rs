//! Interactive input for configuration commands

use crate::error::AppError;
use tokio::io::{self, AsyncBufReadExt};

/// Prompts for a new API base URL and returns the trimmed input.
///
/// An empty answer keeps the current value, which is shown in the prompt.
///
/// # Example
/// ```no_run
/// use league_browser::config::user_prompts::prompt_for_api_base_url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let base_url = prompt_for_api_base_url("https://www.thesportsdb.com/api/v1/json/3").await?;
/// println!("Using {base_url}");
/// # Ok(())
/// # }
/// ```
pub async fn prompt_for_api_base_url(current: &str) -> Result<String, AppError> {
    println!("Please enter the API base URL [{current}]: ");
    let mut input = String::new();
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin);
    reader.read_line(&mut input).await?;

    let input = input.trim();
    if input.is_empty() {
        Ok(current.to_string())
    } else {
        Ok(input.to_string())
    }
}
