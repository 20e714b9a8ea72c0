use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    SafetyCheck,
    Service,
    Breakdown,
    Installation,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Cp12,
    BoilerService,
    WarningNotice,
    GeneralWorks,
    JobSheet,
    Breakdown,
    Commissioning,
}

/// Selects which certificate template family applies to a job.
///
/// A job with no classification (or one the caller could not parse) gets
/// `GeneralWorks`. Jobs with incomplete classification data must still
/// produce a usable certificate, so the fallback is part of the contract.
pub fn resolve(job_type: Option<JobType>) -> ReportKind {
    match job_type {
        Some(JobType::SafetyCheck) => ReportKind::Cp12,
        Some(JobType::Service) => ReportKind::BoilerService,
        Some(JobType::Breakdown) => ReportKind::Breakdown,
        Some(JobType::Installation) => ReportKind::Commissioning,
        Some(JobType::General) | None => ReportKind::GeneralWorks,
    }
}

/// Parses a job-type tag leniently: an unrecognized tag behaves the same as
/// a missing one, so `resolve` still lands on the fallback kind.
pub fn parse_job_type(tag: &str) -> Option<JobType> {
    serde_json::from_value(serde_json::Value::String(tag.to_string())).ok()
}
