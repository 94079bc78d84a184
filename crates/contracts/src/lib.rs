//! Shared contracts between the backend and the frontend.
//!
//! Everything here is plain serde data plus pure logic (config merging,
//! pagination math) so both sides of the wire agree on the shapes.

pub mod filters;
pub mod pagination;
pub mod remitos;
pub mod table_config;
