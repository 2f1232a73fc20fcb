pub mod actions;
pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use actions::ChromeCommand;
pub use errors::{ConfigError, EngineError, GriffinError, StoreError};
pub use events::{Event, EventBus};
pub use id::{new_id, TabId};
pub use types::{PixelRect, Rect, TabColor};

pub type Result<T> = std::result::Result<T, GriffinError>;
