pub mod remito;
pub mod table_config;
