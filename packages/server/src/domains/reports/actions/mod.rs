//! Reports domain actions - entry-point business logic

pub mod generate_report;

pub use generate_report::generate_report;
