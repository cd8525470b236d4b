pub mod report;
pub mod request;

pub use report::{
    format_amount, RankedProject, Report, ReportPage, ReportStats, ScoreBand, ScoredProject,
};
pub use request::{PageInfo, ReportRequest, ReportResponse};
