use serde::{Deserialize, Serialize};

/// Logical geometry as reported by the host layout (fractional).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<PixelRect> for Rect {
    fn from(px: PixelRect) -> Self {
        Self::new(
            f64::from(px.x),
            f64::from(px.y),
            f64::from(px.width),
            f64::from(px.height),
        )
    }
}

/// Integer device-pixel geometry. Rendering engines reject or mis-render
/// fractional bounds, so everything pushed to a surface goes through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Round every coordinate to the nearest pixel.
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            x: rect.x.round() as i32,
            y: rect.y.round() as i32,
            width: rect.width.round() as i32,
            height: rect.height.round() as i32,
        }
    }

    /// Whether both dimensions reach `min_px`.
    pub fn is_visible(&self, min_px: i32) -> bool {
        self.width >= min_px && self.height >= min_px
    }
}
