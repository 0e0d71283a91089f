//! Core types and configuration for parley.
//!
//! This crate provides platform-agnostic types that can be used across
//! all parley sub-crates.

mod config;
mod state;

pub use config::{Config, ConfigManager, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_VOICE_LANGUAGE};
pub use state::{InterviewRole, InterviewRound, SessionPhase};

/// Application name
pub const APP_NAME: &str = "parley";

/// Pretty application name for display
pub const APP_NAME_PRETTY: &str = "Parley";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
