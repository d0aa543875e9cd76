//! Entity model for the SRMA Engine API
//!
//! Wire shapes for the two entity types (reviews, papers), their page
//! envelopes, and the request payloads the client sends. Status domains
//! are closed enums: a value outside the domain fails decoding instead
//! of being coerced.

mod paper;
mod review;

pub use paper::{Paper, PaperFilter, PaperPage, PaperPatch, PaperStatus, ScreeningLabel};
pub use review::{CreateReview, Review, ReviewFilter, ReviewPage, ReviewStatus, UpdateReview};
