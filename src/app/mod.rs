// HireScope - app/mod.rs
//
// Application layer: roster loading, saved searches, search state.
// Dependencies: core layer.

pub mod roster;
pub mod saved_searches;
pub mod state;
