// HireScope - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform, app, or perform I/O beyond Write objects.

pub mod export;
pub mod filter;
pub mod model;
pub mod query;
