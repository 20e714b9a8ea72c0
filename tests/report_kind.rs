use jobcert::report_kind::{JobType, ReportKind, parse_job_type, resolve};

#[test]
fn table_lookups() {
    assert_eq!(resolve(Some(JobType::SafetyCheck)), ReportKind::Cp12);
    assert_eq!(resolve(Some(JobType::Service)), ReportKind::BoilerService);
    assert_eq!(resolve(Some(JobType::Breakdown)), ReportKind::Breakdown);
    assert_eq!(resolve(Some(JobType::Installation)), ReportKind::Commissioning);
    assert_eq!(resolve(Some(JobType::General)), ReportKind::GeneralWorks);
}

#[test]
fn missing_classification_falls_back_to_general_works() {
    assert_eq!(resolve(None), ReportKind::GeneralWorks);
}

#[test]
fn unknown_tag_falls_back_to_general_works() {
    let parsed = parse_job_type("unknown_type");
    assert!(parsed.is_none());
    assert_eq!(resolve(parsed), ReportKind::GeneralWorks);
}

#[test]
fn tags_round_trip_as_snake_case() {
    assert_eq!(parse_job_type("safety_check"), Some(JobType::SafetyCheck));
    let json = serde_json::to_string(&ReportKind::BoilerService).expect("serialize");
    assert_eq!(json, "\"boiler_service\"");
}
