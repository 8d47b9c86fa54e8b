//! Drag session state machine.
//!
//! A drag is driven by four abstract inputs (press, move, release, cancel)
//! through the pure [`transition`] function. The engine owns the current
//! [`DragState`] and interprets the returned [`DragEffect`]s.
//!
//! Lifecycle: `Idle -> Pressed -> Dragging -> (Committing | Cancelling) -> Idle`.
//! `Committing` and `Cancelling` are transient: they are reported through
//! [`DragEffect::Phase`] but never stored.

mod machine;
mod target;

pub use self::machine::{
    DragContext, DragEffect, DragEnd, DragInput, DragPhase, DragSession, DragState, PressInfo,
    transition,
};
pub use self::target::resolve_drop_target;
