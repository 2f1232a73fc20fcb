//! One-shot window-chrome commands forwarded by the shell.
//!
//! These carry no state to reconcile: the app executes them against the
//! window or the currently visible surface and forgets them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum ChromeCommand {
    #[serde(rename = "window-minimize")]
    Minimize,
    #[serde(rename = "window-maximize")]
    Maximize,
    #[serde(rename = "window-maximize-toggle")]
    ToggleMaximize,
    #[serde(rename = "window-close")]
    Close,
    #[serde(rename = "web-undo")]
    Undo,
    #[serde(rename = "web-redo")]
    Redo,
    #[serde(rename = "web-cut")]
    Cut,
    #[serde(rename = "web-copy")]
    Copy,
    #[serde(rename = "web-paste")]
    Paste,
    #[serde(rename = "web-delete")]
    Delete,
    #[serde(rename = "web-select-all")]
    SelectAll,
    #[serde(rename = "web-reload")]
    Reload,
    #[serde(rename = "web-force-reload")]
    ForceReload,
    #[serde(rename = "web-toggle-devtools")]
    ToggleDevtools,
    #[serde(rename = "web-actual-size")]
    ActualSize,
    #[serde(rename = "web-zoom-in")]
    ZoomIn,
    #[serde(rename = "web-zoom-out")]
    ZoomOut,
    #[serde(rename = "web-toggle-fullscreen")]
    ToggleFullscreen,
    #[serde(rename = "web-open-url")]
    OpenUrl(String),
}

impl ChromeCommand {
    /// Human-readable label for menus and logs.
    pub fn label(&self) -> &'static str {
        match self {
            ChromeCommand::Minimize => "Minimize",
            ChromeCommand::Maximize => "Maximize",
            ChromeCommand::ToggleMaximize => "Toggle Maximize",
            ChromeCommand::Close => "Close Window",
            ChromeCommand::Undo => "Undo",
            ChromeCommand::Redo => "Redo",
            ChromeCommand::Cut => "Cut",
            ChromeCommand::Copy => "Copy",
            ChromeCommand::Paste => "Paste",
            ChromeCommand::Delete => "Delete",
            ChromeCommand::SelectAll => "Select All",
            ChromeCommand::Reload => "Reload",
            ChromeCommand::ForceReload => "Force Reload",
            ChromeCommand::ToggleDevtools => "Toggle Developer Tools",
            ChromeCommand::ActualSize => "Actual Size",
            ChromeCommand::ZoomIn => "Zoom In",
            ChromeCommand::ZoomOut => "Zoom Out",
            ChromeCommand::ToggleFullscreen => "Toggle Fullscreen",
            ChromeCommand::OpenUrl(_) => "Open in Browser",
        }
    }

    /// Whether the command targets the visible surface rather than the
    /// host window.
    pub fn targets_surface(&self) -> bool {
        !matches!(
            self,
            ChromeCommand::Minimize
                | ChromeCommand::Maximize
                | ChromeCommand::ToggleMaximize
                | ChromeCommand::Close
                | ChromeCommand::ToggleFullscreen
                | ChromeCommand::OpenUrl(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unit_command_from_ipc_json() {
        let cmd: ChromeCommand = serde_json::from_str(r#"{"kind":"window-minimize"}"#).unwrap();
        assert_eq!(cmd, ChromeCommand::Minimize);
    }

    #[test]
    fn parses_open_url_with_payload() {
        let cmd: ChromeCommand =
            serde_json::from_str(r#"{"kind":"web-open-url","payload":"https://example.com"}"#)
                .unwrap();
        assert_eq!(cmd, ChromeCommand::OpenUrl("https://example.com".into()));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<ChromeCommand, _> = serde_json::from_str(r#"{"kind":"web-explode"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn window_commands_do_not_target_surface() {
        assert!(!ChromeCommand::Minimize.targets_surface());
        assert!(!ChromeCommand::OpenUrl("x".into()).targets_surface());
        assert!(ChromeCommand::Reload.targets_surface());
        assert!(ChromeCommand::ZoomIn.targets_surface());
    }

    #[test]
    fn labels_are_non_empty() {
        assert_eq!(ChromeCommand::ToggleDevtools.label(), "Toggle Developer Tools");
        assert_eq!(ChromeCommand::OpenUrl(String::new()).label(), "Open in Browser");
    }
}
