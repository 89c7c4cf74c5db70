//! Ruler Core - Shared types
//!
//! This crate provides the types used throughout Ruler:
//! - `RulerError`: Errors raised by unit lookup and conversion
//! - `ErrorPayload`: Structured form of an error for tool clients

mod error;

pub use error::{codes, ErrorPayload, RulerError};

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, RulerError>;
