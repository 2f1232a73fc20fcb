use serde::{Deserialize, Deserializer, Serialize};

/// The colors offered by the tab color picker.
pub const TAB_COLOR_PALETTE: [&str; 5] = ["#EF4444", "#22C55E", "#3B82F6", "#EAB308", "#A855F7"];

/// Color tag attached to a tab. Stored as a normalized `#RRGGBB` string so
/// that lexical ordering groups identical colors together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TabColor(String);

impl TabColor {
    pub fn parse(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(format!("#{}", hex.to_ascii_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }
}

impl<'de> Deserialize<'de> for TabColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TabColor::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid tab color: {raw}")))
    }
}

