//! Multitool Telegram bot
//!
//! Proxies a weather service, a currency converter and a random picture
//! service, and builds native polls, driven by a small per-user state machine.

/// Telegram transport: dispatch, keyboards, delivery
pub mod bot;
/// Configuration management
pub mod config;
/// Conversation state machine
pub mod dialogue;
/// User-facing texts
pub mod locale;
/// Masked log output
pub mod logging;
/// External API clients and formatters
pub mod services;
pub mod utils;
