pub mod actlang;
pub mod config;
pub mod error;
