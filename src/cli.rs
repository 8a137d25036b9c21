use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the application should run in non-interactive mode
/// Non-interactive mode is used when any of these conditions are met:
/// - --once, --sports or --badge print something and exit
/// - config operations are requested
pub fn is_noninteractive_mode(args: &Args) -> bool {
    args.once
        || args.list_sports
        || args.badge.is_some()
        || is_config_update(args)
        || args.list_config
}

/// True when any of --config, --set-log-file or --clear-log-file is given
pub fn is_config_update(args: &Args) -> bool {
    args.new_api_base_url.is_some() || args.new_log_file_path.is_some() || args.clear_log_file_path
}

/// Sports league catalog browser
///
/// Browses the TheSportsDB league catalog in the terminal. Search by league
/// name or alternate name, narrow the list down to one sport and open a
/// league to see its current season badge.
///
/// In interactive mode (default):
/// - Type to search (applied 300 ms after the last keystroke), Esc clears it
/// - Tab / Shift+Tab cycles the sport filter
/// - Arrow keys move between league cards, Enter shows the season badge
/// - Ctrl+R retries a failed load, Ctrl+L clears all filters
/// - Ctrl+Q or Ctrl+C quits
#[derive(Parser, Debug, Default)]
#[command(about, version, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Print the (filtered) league list once and exit. Useful for scripts.
    #[arg(short, long)]
    pub once: bool,

    /// Initial search text. Matches league names and alternate names, case-insensitively.
    #[arg(long = "search", short = 's', value_name = "TEXT", help_heading = "Filtering")]
    pub search: Option<String>,

    /// Initial sport filter. Must match the sport name exactly, e.g. "Soccer".
    #[arg(long = "sport", value_name = "SPORT", help_heading = "Filtering")]
    pub sport: Option<String>,

    /// Print the available sports and exit.
    #[arg(long = "sports", help_heading = "Filtering")]
    pub list_sports: bool,

    /// Print the current season badge for a league id and exit.
    #[arg(long = "badge", value_name = "LEAGUE_ID")]
    pub badge: Option<String>,

    /// Disable colors and clickable badge links in the output.
    /// Useful for terminals that don't support links or for plain text output.
    #[arg(long = "plain", short = 'p', help_heading = "Display Options")]
    pub plain: bool,

    /// Update the API base URL in config. Will prompt for a new one if not provided.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "BASE_URL",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_api_base_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug logging. With --once, logs are also written to the terminal.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
