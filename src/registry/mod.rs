//! Card registry: stable card ids mapped to host-supplied visual components.

mod core;

pub use self::core::{CardRegistry, CardView};

#[cfg(test)]
pub(crate) use self::core::tests::TestCard;
