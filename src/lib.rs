pub mod checklist;
pub mod cli;
pub mod config;
pub mod job;
pub mod progress;
pub mod report;
pub mod report_kind;
pub mod util;
