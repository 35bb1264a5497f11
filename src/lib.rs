//! Terminal administration console for an HR management gateway.
//!
//! The console lists, searches and edits users, roles, permissions, modules,
//! countries, states and cities over the gateway's REST API, gating every
//! screen and action on the operator's roles.

pub mod app;
pub mod auth;
pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod gateway;
pub mod list_view;
pub mod logger;
pub mod router;
pub mod screen;
pub mod state;
pub mod ui;
