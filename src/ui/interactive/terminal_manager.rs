//! Terminal management for interactive UI
//!
//! This module handles terminal setup and cleanup operations including:
//! - Raw mode enabling/disabling
//! - Alternate screen management
//! - Mouse capture for closing the badge modal by clicking the backdrop

use crate::error::AppError;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::{Stdout, stdout};

/// Configuration for terminal management operations
#[derive(Debug, Clone, Default)]
pub struct TerminalConfig {
    pub debug_mode: bool,
}

/// Terminal manager responsible for setup and cleanup operations
pub struct TerminalManager {
    config: TerminalConfig,
}

impl TerminalManager {
    pub fn new() -> Self {
        Self {
            config: TerminalConfig::default(),
        }
    }

    pub fn with_config(config: TerminalConfig) -> Self {
        Self { config }
    }

    /// Setup terminal for interactive mode
    /// Returns a handle to stdout that can be used for rendering
    pub fn setup_terminal(&self) -> Result<Stdout, AppError> {
        let mut stdout = stdout();

        if !self.config.debug_mode {
            enable_raw_mode()?;
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        }

        Ok(stdout)
    }

    /// Restores the terminal to its original state
    pub fn cleanup_terminal(&self, mut stdout: Stdout) -> Result<(), AppError> {
        if !self.config.debug_mode {
            disable_raw_mode()?;
            execute!(stdout, DisableMouseCapture, LeaveAlternateScreen, Show)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }
}

impl Default for TerminalManager {
    fn default() -> Self {
        Self::new()
    }
}
