//! SRMA Engine API Client
//!
//! Client-side data-synchronization layer for the SRMA Engine:
//! - `transport` - single configured HTTP client with normalized errors
//! - `api` - one thin resource accessor per entity type
//! - `cache` - keyed query cache with request deduplication and
//!   prefix invalidation
//! - `store` - facade tying cache and accessors together
//!
//! Derived pipeline state (`srma_common::phase`) is pure and recomputed
//! per call; it is never cached as if it were server state.

pub mod api;
pub mod cache;
pub mod store;
pub mod transport;

// Re-export commonly used types
pub use cache::{Entity, QueryCache, QueryKey};
pub use srma_common::{ApiError, ClientConfig, Result};
pub use store::Store;
pub use transport::ApiClient;
