//! Error handling
//!
//! Defines error types and handling for the media storage.

pub mod handlers;
pub mod types;

pub use types::*;
