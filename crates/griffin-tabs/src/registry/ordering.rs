//! Title, color and ordering edits.

use griffin_common::{TabColor, TabId};

use super::TabRegistry;

impl TabRegistry {
    pub fn rename(&mut self, id: &TabId, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(record) => {
                record.title = title.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_color(&mut self, id: &TabId, color: Option<TabColor>) -> bool {
        match self.get_mut(id) {
            Some(record) => {
                record.color = color;
                true
            }
            None => false,
        }
    }

    /// Group tabs by color tag. Stable within a color; untagged tabs go
    /// last.
    pub fn sort_by_color(&mut self) {
        self.tabs.sort_by(|a, b| match (&a.color, &b.color) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }

    /// Move the tab at `from` to position `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tabs.len() || to >= self.tabs.len() {
            return false;
        }
        if from != to {
            let record = self.tabs.remove(from);
            self.tabs.insert(to, record);
        }
        true
    }

    /// Apply a full ordering coming from the tab strip. Unknown ids are
    /// skipped and tabs missing from `order` keep their relative order at
    /// the end.
    pub fn set_order(&mut self, order: &[TabId]) {
        let mut remaining = std::mem::take(&mut self.tabs);
        for id in order {
            if let Some(pos) = remaining.iter().position(|t| &t.id == id) {
                self.tabs.push(remaining.remove(pos));
            }
        }
        self.tabs.append(&mut remaining);
    }
}
