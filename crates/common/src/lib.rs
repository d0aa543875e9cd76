//! SRMA Client Shared Library
//!
//! Shared code for the SRMA Engine client:
//! - Entity model with closed status domains
//! - Error taxonomy
//! - Configuration management
//! - Pipeline phase derivation

pub mod config;
pub mod errors;
pub mod models;
pub mod phase;

// Re-export commonly used types
pub use config::ClientConfig;
pub use errors::{ApiError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
