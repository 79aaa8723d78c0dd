// HireScope - lib.rs
//
// Library entry point, exposing all modules for integration testing
// and for embedding the applicant search in other tools.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::core::filter::{matches, try_matches, SearchQuery};
pub use crate::core::model::ApplicantRecord;
