// ABOUTME: Main application structure and state management for the TUI

pub mod events;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use state::{App, AppState, StatusLevel, StatusMessage};
