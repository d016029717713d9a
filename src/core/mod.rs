// LeadDesk - core/mod.rs
//
// Core business logic layer: data model, derivation pipeline, import/export.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod import;
pub mod model;
pub mod phone;
pub mod query;
