// HTTP routes
pub mod error;
pub mod health;
pub mod projects;
pub mod reports;
pub mod scores;
pub mod scoring;

pub use error::ApiError;
pub use health::*;
pub use projects::*;
pub use reports::*;
pub use scores::*;
pub use scoring::*;
