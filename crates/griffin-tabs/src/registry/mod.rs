//! TabRegistry: ordered tab records, the trash, the active id and the
//! global multi-view overlay.
//!
//! Single writer of tab metadata. Every mutation is a plain method call;
//! the host decides what the surface pool has to do in response.

mod grid;
mod lifecycle;
mod ordering;


use std::collections::HashSet;

use chrono::{DateTime, Utc};
use griffin_common::TabId;
use serde::{Deserialize, Serialize};

use crate::record::{SlotBindings, TabRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiViewState {
    pub open: bool,
    pub slots: SlotBindings,
}

/// Persisted form of the registry. The overlay's open flag is runtime
/// state and always comes back closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabSnapshot {
    pub active_tabs: Vec<TabRecord>,
    pub deleted_tabs: Vec<TabRecord>,
    pub active_tab_id: Option<TabId>,
    pub multi_view_slots: SlotBindings,
}

#[derive(Debug, Default)]
pub struct TabRegistry {
    tabs: Vec<TabRecord>,
    trash: Vec<TabRecord>,
    active_id: Option<TabId>,
    multi_view: MultiViewState,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a snapshot. Duplicate ids are dropped (first wins,
    /// active collection before trash) and a dangling active id falls
    /// back to the first tab.
    pub fn from_snapshot(snapshot: TabSnapshot) -> Self {
        let mut seen = HashSet::new();
        let mut keep = |record: &TabRecord| {
            let fresh = seen.insert(record.id.clone());
            if !fresh {
                tracing::warn!(tab_id = %record.id, "Dropping duplicate tab id from snapshot");
            }
            fresh
        };
        let tabs: Vec<TabRecord> = snapshot.active_tabs.into_iter().filter(|t| keep(t)).collect();
        let trash: Vec<TabRecord> = snapshot.deleted_tabs.into_iter().filter(|t| keep(t)).collect();

        let active_id = match snapshot.active_tab_id {
            Some(id) if tabs.iter().any(|t| t.id == id) => Some(id),
            _ => tabs.first().map(|t| t.id.clone()),
        };

        Self {
            tabs,
            trash,
            active_id,
            multi_view: MultiViewState {
                open: false,
                slots: snapshot.multi_view_slots,
            },
        }
    }

    pub fn snapshot(&self) -> TabSnapshot {
        TabSnapshot {
            active_tabs: self.tabs.clone(),
            deleted_tabs: self.trash.clone(),
            active_tab_id: self.active_id.clone(),
            multi_view_slots: self.multi_view.slots.clone(),
        }
    }

    pub fn list_active(&self) -> &[TabRecord] {
        &self.tabs
    }

    pub fn trash(&self) -> &[TabRecord] {
        &self.trash
    }

    pub fn get(&self, id: &TabId) -> Option<&TabRecord> {
        self.tabs.iter().find(|t| &t.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &TabId) -> Option<&mut TabRecord> {
        self.tabs.iter_mut().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.get(id).is_some()
    }

    pub fn active_id(&self) -> Option<&TabId> {
        self.active_id.as_ref()
    }

    pub fn active(&self) -> Option<&TabRecord> {
        self.active_id.as_ref().and_then(|id| self.get(id))
    }

    /// Record an access without changing the active tab.
    pub fn touch(&mut self, id: &TabId, now: DateTime<Utc>) -> bool {
        match self.get_mut(id) {
            Some(record) => {
                record.last_accessed = Some(now);
                true
            }
            None => false,
        }
    }

    /// Make `id` the single active tab and stamp its access time. Unknown
    /// ids and the already active tab leave the registry untouched. Returns whether the active id
    /// changed.
    pub fn set_active(&mut self, id: Option<&TabId>, now: DateTime<Utc>) -> bool {
        match id {
            None => self.active_id.take().is_some(),
            Some(id) => {
                if self.active_id.as_ref() == Some(id) {
                    return false;
                }
                if !self.touch(id, now) {
                    tracing::debug!(tab_id = %id, "Ignoring activation of unknown tab");
                    return false;
                }
                self.active_id = Some(id.clone());
                true
            }
        }
    }
}
