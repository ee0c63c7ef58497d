pub mod artifact;
pub mod config;
pub mod error;
pub mod factory;
pub mod params;
pub mod revert;
pub mod runner;
pub mod utils;

pub type Result<T> = std::result::Result<T, error::Error>;
