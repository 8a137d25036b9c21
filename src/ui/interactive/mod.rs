//! Interactive UI module for the league browser
//!
//! This module is organized into focused submodules:
//! - `badge_modal`: Season badge modal state machine
//! - `input_handler`: Keyboard bindings
//! - `event_handler`: Keyboard, mouse and resize event handling
//! - `refresh_manager`: Loop timing and polling intervals
//! - `state_manager`: Search, filter, selection and render state
//! - `terminal_manager`: Raw mode, alternate screen and mouse capture
//! - `core`: Main interactive UI loop and orchestration

mod badge_modal;
mod core;
mod event_handler;
mod input_handler;
mod refresh_manager;
mod state_manager;
mod terminal_manager;

pub use badge_modal::BadgeModal;
pub use core::run_interactive_ui;
pub use state_manager::{ALL_SPORTS, InteractiveState};
