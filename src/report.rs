use crate::{
    checklist::ItemResult,
    config::Config,
    job::JobRecord,
    progress::ProgressStore,
    report_kind::{self, ReportKind},
};
use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub job_id: String,
    pub client: String,
    pub report_kind: ReportKind,
    pub total_items: usize,
    pub completed_items: usize,
    pub completion_pct: u8,
    pub failed_items: Vec<String>,
    pub lines: Vec<ReportLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLine {
    pub id: String,
    pub label: String,
    pub result: ItemResult,
    pub note: Option<String>,
    pub photo_count: usize,
}

/// Builds the final per-job summary: which certificate template applies,
/// overall completion, and one line per checklist item with its cleaned note.
pub fn assemble(cfg: &Config, job: &JobRecord, store: &ProgressStore) -> Result<ReportSummary> {
    let total = job.items.len();
    let completed = store.completed();
    let pct = store.completion_ratio(total);

    let mut failed = Vec::new();
    let mut lines = Vec::with_capacity(total);

    for item in &job.items {
        let result = store.get(&item.id).unwrap_or(item.result);
        if result == ItemResult::Fail {
            failed.push(item.id.clone());
        }
        let note = match &item.note {
            Some(raw) => clean_note(cfg, raw)?,
            None => None,
        };
        lines.push(ReportLine {
            id: item.id.clone(),
            label: item.label.clone(),
            result,
            note,
            photo_count: item.photos.len(),
        });
    }

    Ok(ReportSummary {
        job_id: job.id.clone(),
        client: job.client.clone(),
        report_kind: report_kind::resolve(job.job_type),
        total_items: total,
        completed_items: completed,
        completion_pct: pct,
        failed_items: failed,
        lines,
    })
}

/// Normalizes a free-text inspector note for inclusion in the report.
/// Returns `None` when nothing survives cleanup.
pub fn clean_note(cfg: &Config, raw: &str) -> Result<Option<String>> {
    let mut note = raw.to_string();

    if cfg.notes.normalize_newlines {
        note = note.replace("\r\n", "\n");
    }

    if cfg.notes.normalize_unicode {
        note = note.nfkc().collect::<String>();
    }

    if cfg.notes.trim_trailing_whitespace {
        note = note
            .lines()
            .map(|l| l.trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n");
    }

    if cfg.notes.remove_by_regex {
        note = remove_by_regex(cfg, &note)?;
    }

    let trimmed = note.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

fn remove_by_regex(cfg: &Config, s: &str) -> Result<String> {
    let regs: Vec<Regex> = cfg
        .notes
        .regex
        .patterns
        .iter()
        .map(|p| Regex::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut out = Vec::new();
    for line in s.lines() {
        let mut matched = false;
        for r in &regs {
            if r.is_match(line.trim()) {
                matched = true;
                break;
            }
        }
        if !matched {
            out.push(line);
        }
    }
    Ok(out.join("\n"))
}
