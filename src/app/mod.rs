// LeadDesk - app/mod.rs
//
// Application layer: lead store, persistence, background import, UI state.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod import;
pub mod persistence;
pub mod state;
pub mod store;
