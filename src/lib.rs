//! LocGenAI: a regional-knowledge chatbot.
//!
//! Questions are answered from a curated seed list when possible, then by a
//! primary and a backup Gemini model, and finally by a canned apology.
//! [`core::Responder`] is the entry point for any front end.

pub mod ai;
pub mod config;
pub mod core;
pub mod error;
pub mod logger;
pub mod services;
pub mod ui;

pub use config::Config;
pub use error::ChatError;
