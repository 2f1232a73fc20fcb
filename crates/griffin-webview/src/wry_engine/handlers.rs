use std::sync::Arc;

use griffin_common::TabId;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::engine::LoadState;
use crate::events::{PageLoadState, SurfaceEvent};

// =============================================================================
// NAVIGATION RULES
// =============================================================================

/// Origins the shell webview may navigate to.
pub const SHELL_NAV_PREFIXES: &[&str] = &[
    "griffin://",
    // WebView2 rewrites griffin://localhost/… → http://griffin.localhost/…
    "http://griffin.localhost",
    "about:blank",
];

pub fn is_shell_navigation_allowed(url: &str) -> bool {
    SHELL_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

/// Chart surfaces only load web content.
pub fn is_surface_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

pub(super) type EventSink = Arc<Mutex<Vec<SurfaceEvent>>>;

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

pub(super) fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    load: Arc<watch::Sender<LoadState>>,
    tab: Option<TabId>,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(tab_id = ?tab.as_ref().map(TabId::as_str), ?state, url = %url, "page load");
        // Failed is terminal until the surface is recreated
        load.send_if_modified(|current| {
            let next = LoadState::from(state);
            if *current == LoadState::Failed || *current == next {
                return false;
            }
            *current = next;
            true
        });
        events.lock().push(SurfaceEvent::PageLoad {
            tab: tab.clone(),
            state,
            url,
        });
    })
}

pub(super) fn attach_title_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    tab: TabId,
) -> WebViewBuilder<'a> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(tab_id = %tab, title = %title, "title changed");
        events.lock().push(SurfaceEvent::TitleChanged {
            tab: tab.clone(),
            title,
        });
    })
}

/// Popups never open inside the app; they go to the system browser.
pub(super) fn attach_new_window_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    tab: Option<TabId>,
) -> WebViewBuilder<'a> {
    builder.with_new_window_req_handler(move |url| {
        debug!(url = %url, "new window requested, deferring to system browser");
        events.lock().push(SurfaceEvent::NewWindowRequested {
            tab: tab.clone(),
            url,
        });
        false
    })
}

pub(super) fn attach_shell_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();

        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
            return;
        }

        debug!(body_len = body.len(), "IPC message from shell");
        events.lock().push(SurfaceEvent::IpcMessage { body });
    })
}

pub(super) fn attach_shell_navigation_handler(builder: WebViewBuilder<'_>) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(move |url| {
        if !is_shell_navigation_allowed(&url) {
            warn!(url = %url, "shell navigation blocked");
            return false;
        }
        true
    })
}

// =============================================================================
// TESTS
// =============================================================================
