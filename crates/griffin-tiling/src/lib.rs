pub mod layout;
pub mod slots;
pub mod tree;

pub use layout::LayoutEngine;
pub use slots::{SlotLayout, GRID_SLOT_COUNT};
pub use tree::{Direction, MosaicNode};
