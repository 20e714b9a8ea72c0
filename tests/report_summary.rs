use jobcert::checklist::{ChecklistTemplate, ItemResult, TemplateItem, instantiate};
use jobcert::config::Config;
use jobcert::job::JobRecord;
use jobcert::progress::ProgressStore;
use jobcert::report::{assemble, clean_note};
use jobcert::report_kind::{JobType, ReportKind};

fn mk_job(job_type: Option<JobType>) -> JobRecord {
    let tpl = ChecklistTemplate {
        name: "cp12-landlord".to_string(),
        items: ["flue flow", "ventilation", "flame picture"]
            .iter()
            .map(|l| TemplateItem {
                label: l.to_string(),
                position: None,
            })
            .collect(),
    };
    let id = "job123".to_string();
    JobRecord {
        items: instantiate(&tpl, &id),
        id,
        client: "Mrs Harris".to_string(),
        job_type,
        created: "2026-01-05T09:00:00Z".to_string(),
    }
}

#[test]
fn summary_reflects_results_and_kind() {
    let cfg = Config::default();
    let mut job = mk_job(Some(JobType::SafetyCheck));
    job.items[0].result = ItemResult::Pass;
    job.items[1].result = ItemResult::Fail;
    job.items[1].note = Some("Vent blocked by insulation".to_string());

    let mut store = ProgressStore::new();
    store.load_snapshot(job.snapshot());

    let summary = assemble(&cfg, &job, &store).expect("assemble");
    assert_eq!(summary.report_kind, ReportKind::Cp12);
    assert_eq!(summary.total_items, 3);
    assert_eq!(summary.completed_items, 2);
    assert_eq!(summary.completion_pct, 67);
    assert_eq!(summary.failed_items, vec![job.items[1].id.clone()]);
    assert_eq!(summary.lines.len(), 3);
    assert_eq!(
        summary.lines[1].note.as_deref(),
        Some("Vent blocked by insulation")
    );
}

#[test]
fn unclassified_job_gets_general_works() {
    let cfg = Config::default();
    let job = mk_job(None);
    let mut store = ProgressStore::new();
    store.load_snapshot(job.snapshot());

    let summary = assemble(&cfg, &job, &store).expect("assemble");
    assert_eq!(summary.report_kind, ReportKind::GeneralWorks);
    assert_eq!(summary.completion_pct, 0);
}

#[test]
fn notes_are_normalized_and_stripped_of_boilerplate() {
    let cfg = Config::default();

    // NFKC folds the ligature; CRLF becomes LF; boilerplate lines drop out.
    let cleaned = clean_note(&cfg, "ﬂue ok\r\nN/A\r\n---\r\nresealed joint  ")
        .expect("clean")
        .expect("non-empty");
    assert_eq!(cleaned, "flue ok\nresealed joint");
}

#[test]
fn all_boilerplate_note_collapses_to_none() {
    let cfg = Config::default();
    let cleaned = clean_note(&cfg, "n/a\r\n none ").expect("clean");
    assert_eq!(cleaned, None);
}
