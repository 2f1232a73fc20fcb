//! Serializable picture of the host for the shell to render.

use griffin_common::{TabColor, TabId};
use griffin_tabs::{SavedChart, SlotView, TabKind, TabRecord};
use griffin_webview::SurfacePhase;
use serde::Serialize;

use crate::compositor::Pane;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabView {
    pub id: TabId,
    pub title: String,
    pub url: String,
    pub color: Option<TabColor>,
    pub kind: TabKind,
    /// A surface exists for the tab and its page finished loading.
    pub loaded: bool,
    /// The tab's surface was reclaimed and will be recreated on demand.
    pub hibernated: bool,
}

impl TabView {
    pub fn new(record: &TabRecord, phase: SurfacePhase, loaded: bool) -> Self {
        let hibernated = record.owns_surface() && phase == SurfacePhase::Destroyed;
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            url: record.url.clone(),
            color: record.color.clone(),
            kind: record.kind.clone(),
            loaded,
            hibernated,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShellState {
    pub tabs: Vec<TabView>,
    pub trash: Vec<TabView>,
    pub active_tab_id: Option<TabId>,
    pub multi_view_open: bool,
    pub multi_view_slots: Vec<SlotView>,
    /// Panes of the grid currently on screen, with resolved bindings.
    pub panes: Vec<Pane>,
    pub overlay_open: bool,
    pub charts: Vec<SavedChart>,
    pub inactivity_timeout_minutes: u64,
}

impl ShellState {
    pub fn tab(&self, id: &TabId) -> Option<&TabView> {
        self.tabs.iter().find(|t| &t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hibernated_only_after_destroy() {
        let normal = TabRecord::new("a", "https://a.example", TabKind::Normal);
        assert!(TabView::new(&normal, SurfacePhase::Destroyed, false).hibernated);
        assert!(!TabView::new(&normal, SurfacePhase::Inactive, false).hibernated);
        assert!(!TabView::new(&normal, SurfacePhase::Hidden, false).hibernated);

        let settings = TabRecord::new("", "", TabKind::Settings);
        assert!(!TabView::new(&settings, SurfacePhase::Destroyed, false).hibernated);
    }

    #[test]
    fn state_serializes_tab_kind_tag() {
        let record = TabRecord::new("a", "https://a.example", TabKind::Normal);
        let state = ShellState {
            tabs: vec![TabView::new(&record, SurfacePhase::Active, true)],
            ..Default::default()
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["tabs"][0]["kind"]["type"], "normal");
        assert_eq!(json["tabs"][0]["loaded"], true);
        assert!(state.tab(&record.id).is_some());
    }
}
