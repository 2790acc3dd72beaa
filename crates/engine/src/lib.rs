pub mod analyzer;
pub mod decision;
pub mod report;
pub mod signals;

pub use analyzer::{AccountSettings, Analyzer};
pub use decision::{decide, Decision};
pub use report::AnalysisReport;
pub use signals::{aggregate_news, calendar_recommendation, CalendarEvent, Impact, ScoredArticle};
