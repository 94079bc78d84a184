pub mod remitos;
