pub mod config;
pub mod stock;
