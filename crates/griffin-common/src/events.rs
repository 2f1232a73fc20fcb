//! In-process notifications about tab and surface lifecycle.
//!
//! Delivery is best effort: a lagging subscriber loses the oldest events,
//! and publishing with no subscribers is not an error.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::id::TabId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "tab_id", rename_all = "snake_case")]
pub enum Event {
    TabCreated(TabId),
    /// The single active tab changed. `None` means no tab is shown.
    TabActivated(Option<TabId>),
    TabTrashed(TabId),
    TabRestored(TabId),
    /// The reclaimer released an idle tab's surface. The tab stays.
    SurfaceHibernated(TabId),
    ConfigReloaded,
    Shutdown,
}

impl Event {
    /// The tab the event is about, if any.
    pub fn tab(&self) -> Option<&TabId> {
        match self {
            Event::TabCreated(id)
            | Event::TabTrashed(id)
            | Event::TabRestored(id)
            | Event::SurfaceHibernated(id) => Some(id),
            Event::TabActivated(id) => id.as_ref(),
            Event::ConfigReloaded | Event::Shutdown => None,
        }
    }
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Returns how many subscribers saw the event.
    pub fn publish(&self, event: Event) -> usize {
        tracing::trace!(?event, "publish");
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
