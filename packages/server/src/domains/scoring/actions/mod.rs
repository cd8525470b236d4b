//! Scoring domain actions - entry-point business logic
//!
//! Called directly from the HTTP routes.

pub mod score_batch;
pub mod score_project;

pub use score_batch::score_batch;
pub use score_project::score_project;
