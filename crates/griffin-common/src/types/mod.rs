mod color;
mod core;

pub use self::core::*;
pub use color::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_clone_and_equality() {
        let r = Rect::new(10.0, 20.0, 800.0, 600.0);
        let r2 = r;
        assert_eq!(r, r2);
    }

    #[test]
    fn pixel_rect_rounds_every_coordinate() {
        let r = Rect::new(10.4, 20.6, 799.5, 600.49);
        let px = PixelRect::from_rect(&r);
        assert_eq!(px, PixelRect::new(10, 21, 800, 600));
    }

    #[test]
    fn pixel_rect_rounds_negative_origin() {
        let px = PixelRect::from_rect(&Rect::new(-3.6, -0.4, 100.0, 100.0));
        assert_eq!(px.x, -4);
        assert_eq!(px.y, 0);
    }

    #[test]
    fn pixel_rect_visibility_threshold() {
        assert!(PixelRect::new(0, 0, 10, 10).is_visible(10));
        assert!(!PixelRect::new(0, 0, 9, 400).is_visible(10));
        assert!(!PixelRect::new(0, 0, 400, 9).is_visible(10));
        assert!(!PixelRect::new(0, 0, -5, 400).is_visible(10));
    }

    #[test]
    fn pixel_rect_serialization() {
        let px = PixelRect::new(0, 40, 1920, 1040);
        let json = serde_json::to_string(&px).unwrap();
        let back: PixelRect = serde_json::from_str(&json).unwrap();
        assert_eq!(px, back);
    }

    #[test]
    fn tab_color_accepts_hex_and_normalizes() {
        let c = TabColor::parse("#ef4444").unwrap();
        assert_eq!(c.as_str(), "#EF4444");
        let c = TabColor::parse("22c55e").unwrap();
        assert_eq!(c.as_str(), "#22C55E");
    }

    #[test]
    fn tab_color_rgb_channels() {
        assert_eq!(TabColor::parse("#1c1c1c").unwrap().rgb(), (0x1c, 0x1c, 0x1c));
        assert_eq!(TabColor::parse("#3B82F6").unwrap().rgb(), (0x3b, 0x82, 0xf6));
    }

    #[test]
    fn tab_color_rejects_garbage() {
        assert!(TabColor::parse("zzzzzz").is_none());
        assert!(TabColor::parse("#abc").is_none());
        assert!(TabColor::parse("").is_none());
    }

    #[test]
    fn palette_entries_parse() {
        for hex in TAB_COLOR_PALETTE {
            assert!(TabColor::parse(hex).is_some(), "{hex}");
        }
        assert_eq!(TAB_COLOR_PALETTE.len(), 5);
    }

    #[test]
    fn tab_color_serializes_as_string() {
        let c = TabColor::parse("#3B82F6").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#3B82F6\"");
        let back: TabColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn tab_color_deserialize_rejects_invalid() {
        let result: Result<TabColor, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }
}
