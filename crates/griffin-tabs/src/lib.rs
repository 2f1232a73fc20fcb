//! Logical tab records, the trash, saved charts and their persistence.
//!
//! Nothing in here touches a rendering surface; the registry is the source
//! of truth that the surface pool is driven from.

pub mod charts;
pub mod record;
pub mod registry;
pub mod store;

pub use charts::{parse_urls_to_charts, ChartCatalog, ChartDraft, SavedChart};
pub use record::{GridLayout, GridMode, SlotBindings, SlotView, TabKind, TabRecord};
pub use registry::{MultiViewState, TabRegistry, TabSnapshot};
pub use store::JsonStore;
