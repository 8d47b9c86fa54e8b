//! Dashboard layout engine for a two-column card grid.
//!
//! The engine arranges host-supplied cards into rows (one full-width card or
//! up to two side-by-side cards), persists the arrangement as flat
//! [`DashboardItem`] records, and lets the user reorder cards with a
//! press-and-drag gesture while in edit mode. It never draws anything: the
//! host renders the [`ContainerTree`] it exposes.
//!
//! Modules follow the facade pattern: each directory module re-exports its
//! public types from a private implementation file.

pub mod builder;
pub mod cards;
pub mod codec;
pub mod config;
pub mod drag;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod haptics;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod reducer;
pub mod registry;
pub mod render;
pub mod store;
pub mod width;

pub use builder::{ContainerTree, DragHandle, RowNode, SlotNode};
pub use cards::{CardTypes, StaticCardTypes};
pub use codec::DashboardItem;
pub use config::{EngineConfig, EngineSettings, HapticCue};
pub use drag::{DragEffect, DragEnd, DragInput, DragPhase, DragSession, DragState};
pub use engine::{DashboardEngine, DragVisual};
pub use error::{DashError, HapticsError, Result, StoreError};
pub use geometry::{Point, Rect, RowBand, Size, SolvedLayout};
pub use grid::{CardId, Column, GridModel, GridPosition, GridRow};
pub use haptics::{Haptics, NullHaptics};
pub use input::{PointerInput, pointer_from_key, pointer_from_mouse};
pub use logging::{FileSink, LogEvent, LogLevel, LogSink, Logger, LoggingError, MemorySink};
pub use metrics::{EngineMetrics, MetricSnapshot};
pub use reducer::move_card;
pub use registry::{CardRegistry, CardView};
pub use render::{RendererSettings, TextRenderer};
pub use store::{JsonFileStore, LayoutStore, MemoryStore};
pub use width::display_width;
