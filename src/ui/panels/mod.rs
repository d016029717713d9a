// LeadDesk - ui/panels/mod.rs

pub mod about;
pub mod dashboard;
pub mod dialogs;
pub mod header;
pub mod leads_table;
pub mod upload;
