//! Error types shared across the dashboard engine.

mod types;

pub use types::{DashError, HapticsError, Result, StoreError};
