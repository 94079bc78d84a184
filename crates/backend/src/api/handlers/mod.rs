pub mod report;
pub mod table_config;
