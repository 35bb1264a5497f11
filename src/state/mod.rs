//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds the session, routes and entity screens
//! - Navigation types (Focus, InputMode)
//! - Access editor state for user grants
//! - State error handling

mod access;
mod error;
mod navigation;

pub use access::AccessEditor;
pub use error::StateError;
pub use navigation::{Focus, InputMode};

mod state_impl;

pub use state_impl::{State, SESSION_USER_ID};
