pub mod api;
pub mod config_store;
pub mod filter_machine;
pub mod header_policy;
pub mod state;
pub mod ui;
