//! Grid model: ordered rows of cards in a two-column dashboard.
//!
//! The implementation lives in the private `core` module; callers import
//! the public types from here.

mod core;

pub use self::core::{CardId, Column, GridModel, GridPosition, GridRow};
