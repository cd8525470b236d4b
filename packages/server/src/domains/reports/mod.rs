//! Ranked portfolio reports and executive briefings.

pub mod actions;
pub mod briefing;
pub mod models;

pub use actions::generate_report;
pub use briefing::{templated_briefing, DEFAULT_REPORT_TEMPLATE};
pub use models::*;
