//! Create, delete (move to trash) and restore.

use chrono::{DateTime, Utc};
use griffin_common::TabId;

use super::TabRegistry;
use crate::record::{TabKind, TabRecord};

impl TabRegistry {
    /// Append a new tab. A blank title falls back to the kind's default.
    pub fn create_tab(
        &mut self,
        title: &str,
        url: &str,
        activate: bool,
        kind: TabKind,
        now: DateTime<Utc>,
    ) -> TabId {
        let record = TabRecord::new(title, url, kind);
        let id = record.id.clone();
        tracing::debug!(tab_id = %id, title = %record.title, "Tab created");
        self.tabs.push(record);
        if activate {
            self.set_active(Some(&id), now);
        }
        id
    }

    /// Activate the existing settings tab, or create one.
    pub fn open_settings(&mut self, now: DateTime<Utc>) -> TabId {
        let existing = self
            .tabs
            .iter()
            .find(|t| matches!(t.kind, TabKind::Settings))
            .map(|t| t.id.clone());
        match existing {
            Some(id) => {
                self.set_active(Some(&id), now);
                id
            }
            None => self.create_tab("", "", true, TabKind::Settings, now),
        }
    }

    /// Move a tab to the trash. If it was active the first remaining tab
    /// becomes active. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &TabId) -> bool {
        let Some(pos) = self.tabs.iter().position(|t| &t.id == id) else {
            return false;
        };
        let record = self.tabs.remove(pos);
        if self.active_id.as_ref() == Some(id) {
            self.active_id = self.tabs.first().map(|t| t.id.clone());
        }
        tracing::debug!(tab_id = %id, "Tab moved to trash");
        self.trash.push(record);
        true
    }

    /// Move a tab back from the trash to the end of the strip and make it
    /// the active tab.
    pub fn restore(&mut self, id: &TabId, now: DateTime<Utc>) -> bool {
        let Some(pos) = self.trash.iter().position(|t| &t.id == id) else {
            return false;
        };
        let record = self.trash.remove(pos);
        self.tabs.push(record);
        self.set_active(Some(id), now);
        tracing::debug!(tab_id = %id, "Tab restored from trash");
        true
    }
}
