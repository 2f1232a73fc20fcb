use chrono::{DateTime, Utc};
use griffin_common::{TabColor, TabId};
use griffin_tiling::{MosaicNode, GRID_SLOT_COUNT};
use serde::{Deserialize, Serialize};

/// Per-slot tab references for the fixed split. Non-owning: a binding may
/// name a tab that has since been trashed.
pub type SlotBindings = [Option<TabId>; GRID_SLOT_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    #[default]
    Slots,
    Mosaic,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub mode: GridMode,
    pub slots: SlotBindings,
    pub mosaic: Option<MosaicNode>,
}

impl GridLayout {
    /// Empty slots, with a mosaic seeded from the given candidate tabs.
    pub fn with_candidates(candidates: &[TabId]) -> Self {
        Self {
            mode: GridMode::Slots,
            slots: Default::default(),
            mosaic: MosaicNode::initial(candidates),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TabKind {
    #[default]
    Normal,
    Grid(GridLayout),
    Settings,
}

impl TabKind {
    pub fn default_title(&self) -> &'static str {
        match self {
            TabKind::Normal => "New Tab",
            TabKind::Grid(_) => "Dashboard",
            TabKind::Settings => "Settings",
        }
    }
}

/// What a grid pane shows once its binding is resolved against the
/// registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "tab_id", rename_all = "lowercase")]
pub enum SlotView {
    Empty,
    Bound(TabId),
    /// The binding points at a tab that no longer exists.
    Unavailable(TabId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabRecord {
    pub id: TabId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub color: Option<TabColor>,
    #[serde(default)]
    pub kind: TabKind,
    /// Set when the tab becomes the single active tab; `None` until then.
    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,
}

impl TabRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>, kind: TabKind) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            kind.default_title().to_string()
        } else {
            title
        };
        Self {
            id: TabId::new(),
            title,
            url: url.into(),
            color: None,
            kind,
            last_accessed: None,
        }
    }

    /// Only normal tabs own a rendering surface; grid and settings tabs
    /// are structural.
    pub fn owns_surface(&self) -> bool {
        matches!(self.kind, TabKind::Normal)
    }

    pub fn grid(&self) -> Option<&GridLayout> {
        match &self.kind {
            TabKind::Grid(layout) => Some(layout),
            _ => None,
        }
    }

    pub fn grid_mut(&mut self) -> Option<&mut GridLayout> {
        match &mut self.kind {
            TabKind::Grid(layout) => Some(layout),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_falls_back_per_kind() {
        assert_eq!(TabRecord::new("", "https://a", TabKind::Normal).title, "New Tab");
        assert_eq!(
            TabRecord::new("  ", "", TabKind::Grid(GridLayout::default())).title,
            "Dashboard"
        );
        assert_eq!(TabRecord::new("BTC", "https://a", TabKind::Normal).title, "BTC");
    }

    #[test]
    fn only_normal_tabs_own_surfaces() {
        assert!(TabRecord::new("a", "https://a", TabKind::Normal).owns_surface());
        assert!(!TabRecord::new("s", "", TabKind::Settings).owns_surface());
        assert!(!TabRecord::new("g", "", TabKind::Grid(GridLayout::default())).owns_surface());
    }

    #[test]
    fn grid_layout_starts_with_three_empty_slots() {
        let layout = GridLayout::with_candidates(&[TabId::from("a")]);
        assert_eq!(layout.slots, [None, None, None]);
        assert_eq!(layout.mosaic, Some(MosaicNode::leaf("a")));
    }

    #[test]
    fn record_round_trips_with_grid_layout() {
        let mut layout = GridLayout::default();
        layout.slots[1] = Some(TabId::from("x"));
        let record = TabRecord::new("Dash", "", TabKind::Grid(layout));
        let json = serde_json::to_string(&record).unwrap();
        let back: TabRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn slot_view_serializes_for_the_shell() {
        let json = serde_json::to_value(SlotView::Unavailable(TabId::from("x"))).unwrap();
        assert_eq!(json, serde_json::json!({"state": "unavailable", "tab_id": "x"}));
        let json = serde_json::to_value(SlotView::Empty).unwrap();
        assert_eq!(json, serde_json::json!({"state": "empty"}));
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"id":"t1","title":"A","url":"https://a"}"#;
        let record: TabRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, TabKind::Normal);
        assert!(record.color.is_none());
        assert!(record.last_accessed.is_none());
    }
}
