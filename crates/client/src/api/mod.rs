//! Resource accessors for the SRMA Engine API
//!
//! One accessor per entity type, behind a trait so the store can be
//! exercised against mocks. Each operation is thin and stateless: given
//! validated parameters it issues exactly one HTTP call and returns the
//! decoded entity or collection.

mod papers;
mod reviews;

pub use papers::{HttpPapersApi, PaperUpload, PapersApi};
pub use reviews::{HttpReviewsApi, ReviewsApi};
