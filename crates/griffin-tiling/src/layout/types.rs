/// Gap used when the config does not set one.
pub const DEFAULT_PANE_GAP: u32 = 4;

/// Splits a region into pane rectangles following a mosaic tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEngine {
    /// Pixels left empty between sibling panes.
    pub gap: u32,
}

impl LayoutEngine {
    pub const fn with_gap(gap: u32) -> Self {
        Self { gap }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::with_gap(DEFAULT_PANE_GAP)
    }
}
