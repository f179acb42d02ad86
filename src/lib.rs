//! Terminal "now playing" client for Spotify
//!
//! - `model`: Playback session state machine and its collaborators
//! - `controller`: Input handling and the event loop's transitions
//! - `view`: ratatui rendering
//! - `config`, `auth`, `logging`: Application plumbing

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod view;
