//! Layout builder: turns the grid model into the container tree a host draws.

mod core;

pub use self::core::{ContainerTree, DragHandle, RowNode, SlotNode, build};
