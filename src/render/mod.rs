//! Plain-text preview of a container tree, for terminals and snapshots.

mod core;

pub use self::core::{RendererSettings, TextRenderer};
