//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: gateway requests and their state updates
//! - Terminal events: key presses and ticks

pub mod network;
pub mod terminal;
