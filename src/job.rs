use crate::checklist::{ChecklistItem, ChecklistTemplate, ItemResult, instantiate};
use crate::report_kind::JobType;
use crate::util::{now_rfc3339, short_id};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub client: String,
    #[serde(default)]
    pub job_type: Option<JobType>,
    pub created: String,
    pub items: Vec<ChecklistItem>,
}

impl JobRecord {
    pub fn create(template: &ChecklistTemplate, client: &str, job_type: Option<JobType>) -> Self {
        let created = now_rfc3339();
        let id = short_id(&format!("{client}:{}:{created}", template.name));
        let items = instantiate(template, &id);
        Self {
            id,
            client: client.to_string(),
            job_type,
            created,
            items,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading job: {}", path.display()))?;
        let job: JobRecord = serde_json::from_str(&raw).with_context(|| "parsing job JSON")?;
        Ok(job)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw).with_context(|| format!("writing job: {}", path.display()))
    }

    /// Snapshot of item results for seeding a wizard session's progress
    /// store.
    pub fn snapshot(&self) -> impl Iterator<Item = (String, Option<ItemResult>)> + '_ {
        self.items
            .iter()
            .map(|it| (it.id.clone(), Some(it.result)))
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut ChecklistItem> {
        self.items.iter_mut().find(|it| it.id == item_id)
    }
}
