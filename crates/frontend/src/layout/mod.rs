pub mod global_context;
pub mod puesto_panel;

pub use global_context::{ActiveView, AppGlobalContext};
