use crate::util::short_id;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemResult {
    Pending,
    Pass,
    Fail,
}

/// One inspectable line item within a job. Items are created when the job is
/// instantiated from a template and removed only with the owning job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub job_id: String,
    pub label: String,
    pub result: ItemResult,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    pub name: String,
    pub items: Vec<TemplateItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateItem {
    pub label: String,
    #[serde(default)]
    pub position: Option<u32>,
}

impl ChecklistTemplate {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading template: {}", path.display()))?;
        let tpl: ChecklistTemplate =
            serde_json::from_str(&raw).with_context(|| "parsing template JSON")?;
        Ok(tpl)
    }
}

/// Expands a template into pending checklist items for one job. Item ids are
/// derived from the job id, position, and label, so re-instantiating the same
/// template for the same job yields the same ids.
pub fn instantiate(template: &ChecklistTemplate, job_id: &str) -> Vec<ChecklistItem> {
    template
        .items
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let position = t.position.unwrap_or(i as u32);
            ChecklistItem {
                id: short_id(&format!("{job_id}:{position}:{}", t.label)),
                job_id: job_id.to_string(),
                label: t.label.clone(),
                result: ItemResult::Pending,
                note: None,
                photos: Vec::new(),
                position: Some(position),
            }
        })
        .collect()
}
