pub mod cli;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod provider;
pub mod text;
pub mod transform;
