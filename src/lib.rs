pub mod ai;
pub mod config;
pub mod engine;
pub mod session;
