pub mod project;
pub mod query;

pub use project::{parse_amount, CountryNames, Project, SectorRef};
pub use query::{ProjectPage, ProjectQuery, ProjectSearchParams, DEFAULT_PAGE_SIZE};
