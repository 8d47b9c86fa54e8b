//! Layout codec: flat `DashboardItem` records <-> [`GridModel`](crate::grid::GridModel).

mod core;

pub use self::core::{DashboardItem, decode, digest, encode, from_json, to_json};
