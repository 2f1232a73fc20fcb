//! Window-chrome commands: fire-and-forget actions on the host window or
//! the visible surface.

use griffin_common::ChromeCommand;
use griffin_webview::wry_engine::is_surface_url;
use winit::window::Fullscreen;

use super::core::GriffinApp;

/// Script that performs an editing or navigation command inside a page.
pub(super) fn surface_script(command: &ChromeCommand) -> Option<&'static str> {
    let script = match command {
        ChromeCommand::Undo => "document.execCommand('undo');",
        ChromeCommand::Redo => "document.execCommand('redo');",
        ChromeCommand::Cut => "document.execCommand('cut');",
        ChromeCommand::Copy => "document.execCommand('copy');",
        ChromeCommand::Paste => "document.execCommand('paste');",
        ChromeCommand::Delete => "document.execCommand('delete');",
        ChromeCommand::SelectAll => "document.execCommand('selectAll');",
        ChromeCommand::Reload => "window.location.reload();",
        ChromeCommand::ForceReload => {
            "Promise.resolve(window.caches && caches.keys().then(function(keys) { \
             return Promise.all(keys.map(function(k) { return caches.delete(k); })); \
             })).finally(function() { window.location.reload(); });"
        }
        _ => return None,
    };
    Some(script)
}

/// Zoom steps for a zoom command; `Some(None)` resets to 100%.
pub(super) fn zoom_steps(command: &ChromeCommand) -> Option<Option<i32>> {
    match command {
        ChromeCommand::ZoomIn => Some(Some(1)),
        ChromeCommand::ZoomOut => Some(Some(-1)),
        ChromeCommand::ActualSize => Some(None),
        _ => None,
    }
}

impl GriffinApp {
    pub(super) fn run_chrome_command(&mut self, command: ChromeCommand) {
        if command.targets_surface() {
            self.run_surface_command(&command);
            return;
        }

        match command {
            ChromeCommand::Minimize => {
                if let Some(window) = &self.window {
                    window.set_minimized(true);
                }
            }
            ChromeCommand::Maximize => {
                if let Some(window) = &self.window {
                    window.set_maximized(true);
                }
            }
            ChromeCommand::ToggleMaximize => {
                if let Some(window) = &self.window {
                    window.set_maximized(!window.is_maximized());
                }
            }
            ChromeCommand::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    let next = match window.fullscreen() {
                        Some(_) => None,
                        None => Some(Fullscreen::Borderless(None)),
                    };
                    window.set_fullscreen(next);
                }
            }
            ChromeCommand::Close => {
                tracing::info!("Close requested by the shell");
                self.should_exit = true;
            }
            ChromeCommand::OpenUrl(url) => open_external(&url),
            _ => {}
        }
    }

    /// Editing, reload, zoom, and devtools act on the active tab's surface.
    fn run_surface_command(&mut self, command: &ChromeCommand) {
        let (Some(wry), Some(tab)) = (self.wry.as_mut(), self.active_tab.as_ref()) else {
            tracing::debug!(command = command.label(), "No active surface, ignoring");
            return;
        };

        if let Some(script) = surface_script(command) {
            wry.eval_in_surface(tab, script);
        } else if let Some(steps) = zoom_steps(command) {
            wry.zoom(tab, steps);
        } else if *command == ChromeCommand::ToggleDevtools {
            wry.toggle_devtools(tab);
        }
    }
}

/// Open a web URL in the system browser. Other schemes are refused.
pub(super) fn open_external(url: &str) {
    if !is_surface_url(url) {
        tracing::warn!(url, "Refusing to open non-web URL externally");
        return;
    }
    if let Err(e) = open::that(url) {
        tracing::warn!(url, error = %e, "Failed to open URL in browser");
    }
}
