use crate::checklist::ItemResult;
use std::collections::HashMap;

/// Tracks which checklist items of one wizard session have reached a
/// non-pending result.
///
/// Owned by exactly one session; the rendering layer borrows it. An absent
/// key, an explicit `None`, and `Some(Pending)` all count as "not done" for
/// the completion ratio.
#[derive(Debug, Default)]
pub struct ProgressStore {
    results: HashMap<String, Option<ItemResult>>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire contents with a fresh snapshot. Entries from a
    /// previous job must not survive, so this never merges.
    pub fn load_snapshot<I, S>(&mut self, snapshot: I)
    where
        I: IntoIterator<Item = (S, Option<ItemResult>)>,
        S: Into<String>,
    {
        self.results.clear();
        for (id, result) in snapshot {
            self.results.insert(id.into(), result);
        }
    }

    /// Sets or clears the result for one item. Returns `false` without
    /// touching the map when the new value equals the current one, so the
    /// caller can skip its re-render signal.
    pub fn set_status(&mut self, id: &str, status: Option<ItemResult>) -> bool {
        let current = self.results.get(id);
        match (current, &status) {
            (None, None) => return false,
            (Some(existing), _) if *existing == status => return false,
            _ => {}
        }
        self.results.insert(id.to_string(), status);
        true
    }

    pub fn get(&self, id: &str) -> Option<ItemResult> {
        self.results.get(id).copied().flatten()
    }

    /// Count of items with a present, non-pending result.
    pub fn completed(&self) -> usize {
        self.results
            .values()
            .filter(|r| matches!(r, Some(v) if *v != ItemResult::Pending))
            .count()
    }

    /// Integer percentage of `total` items resolved, rounded half-up.
    /// A zero total yields 0 rather than dividing by zero.
    pub fn completion_ratio(&self, total: usize) -> u8 {
        if total == 0 {
            return 0;
        }
        let done = self.completed().min(total);
        ((100 * done + total / 2) / total) as u8
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
