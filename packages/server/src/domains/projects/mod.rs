pub mod models;

// Re-export commonly used types
pub use models::{
    parse_amount, CountryNames, Project, ProjectPage, ProjectQuery, ProjectSearchParams, SectorRef,
    DEFAULT_PAGE_SIZE,
};
