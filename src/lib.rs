pub mod compiler;
pub mod config;
pub mod dev;
pub mod error;
pub mod harness;
pub mod tokens;
