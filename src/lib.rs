pub mod compositor;
pub mod config;
pub mod crop;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod session;
pub mod store;
pub mod transform;
pub mod viewport;

pub use config::EditorConfig;
pub use crop::{AspectPreset, CropBox, Handle, SnapPolicy};
pub use error::{EngineError, EngineResult};
pub use session::{EditSession, SessionError, SessionState};
pub use store::{ContentRecord, ContentStore, ContentUpdate, EditSettings, MemoryStore};
pub use transform::{Rotation, TransformState};
pub use viewport::ImageBounds;
