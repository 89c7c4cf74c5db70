//! Ruler MCP Server
//!
//! Line-delimited JSON-RPC over stdio.
//!
//! Tools:
//! - list_units: List the supported units in display order
//! - convert: Convert a length between two units
//! - convert_to_all: Convert a length into every other unit

pub mod protocol;
pub mod render;
pub mod server;
pub mod tools;

pub use server::Server;

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "ruler";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
