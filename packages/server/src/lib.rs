// Innovation Scoring Service - API Core
//
// This crate provides the backend API for scoring development-finance
// projects for innovation engagement potential and ranking them into reports.
// Architecture follows domain-driven design: domains/* hold business logic,
// kernel/* holds the infrastructure behind trait seams.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
