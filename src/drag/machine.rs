use crate::geometry::{Point, RowBand};
use crate::grid::{CardId, GridPosition};

use super::target::resolve_drop_target;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pressed,
    Dragging,
    Committing,
    Cancelling,
}

/// Press on a drag handle that has not yet crossed the movement threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct PressInfo {
    pub card: CardId,
    pub position: GridPosition,
    pub origin: Point,
    pub generation: u64,
}

/// Live drag of a single card.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub card: CardId,
    pub original_position: GridPosition,
    pub drop_target: GridPosition,
    /// Pointer position at press time.
    pub origin: Point,
    /// Visual offset of the lifted card (horizontal movement damped).
    pub offset: Point,
    /// Registry generation of the card when the press happened.
    pub generation: u64,
}

impl DragSession {
    /// Whether dropping now would leave the card where it started. A
    /// full-width card spans both columns, so only its row counts.
    pub fn is_noop(&self) -> bool {
        if self.original_position.span_full {
            self.original_position.row == self.drop_target.row
        } else {
            self.original_position.same_slot(&self.drop_target)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Pressed(PressInfo),
    Dragging(DragSession),
}

impl DragState {
    pub fn phase(&self) -> DragPhase {
        match self {
            DragState::Idle => DragPhase::Idle,
            DragState::Pressed(_) => DragPhase::Pressed,
            DragState::Dragging(_) => DragPhase::Dragging,
        }
    }

    pub fn card(&self) -> Option<&CardId> {
        match self {
            DragState::Idle => None,
            DragState::Pressed(press) => Some(&press.card),
            DragState::Dragging(session) => Some(&session.card),
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::Idle)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragInput {
    Press {
        card: CardId,
        position: GridPosition,
        point: Point,
        generation: u64,
    },
    Move(Point),
    Release,
    Cancel,
}

/// Read-only facts the transition needs from the engine.
#[derive(Debug, Clone, Copy)]
pub struct DragContext<'a> {
    pub edit_mode: bool,
    /// Current registry generation of the pressed/dragged card, `None` when
    /// it is no longer registered.
    pub card_generation: Option<u64>,
    pub bands: &'a [RowBand],
    pub width: f32,
    pub threshold: f32,
    pub horizontal_damping: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    /// Dropped on a new slot; a `Commit` effect precedes this.
    Moved,
    /// Dropped back on its original slot.
    NoOp,
    Cancelled,
    /// Released before the movement threshold.
    Tapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragEffect {
    Phase(DragPhase),
    Lift {
        card: CardId,
    },
    ScrollLock(bool),
    DropZone(bool),
    Translate {
        card: CardId,
        offset: Point,
    },
    DropTarget {
        card: CardId,
        target: GridPosition,
    },
    Commit {
        card: CardId,
        from: GridPosition,
        to: GridPosition,
    },
    /// Animate the card back to its original slot.
    Restore {
        card: CardId,
        position: GridPosition,
    },
    Ended(DragEnd),
}

/// Advance the drag state machine by one input.
///
/// Inputs that make no sense in the current state (a second press, a move
/// while idle, a press outside edit mode) leave the state unchanged and
/// produce no effects.
pub fn transition(
    state: DragState,
    input: DragInput,
    ctx: &DragContext<'_>,
) -> (DragState, Vec<DragEffect>) {
    let mut effects = Vec::new();
    let next = match (state, input) {
        (
            DragState::Idle,
            DragInput::Press {
                card,
                position,
                point,
                generation,
            },
        ) => {
            if ctx.edit_mode {
                effects.push(DragEffect::Phase(DragPhase::Pressed));
                DragState::Pressed(PressInfo {
                    card,
                    position,
                    origin: point,
                    generation,
                })
            } else {
                DragState::Idle
            }
        }
        (DragState::Idle, _) => DragState::Idle,

        (state @ (DragState::Pressed(_) | DragState::Dragging(_)), DragInput::Press { .. }) => {
            state
        }

        (DragState::Pressed(press), DragInput::Move(point)) => {
            if is_stale(ctx, press.generation) {
                effects.push(DragEffect::Phase(DragPhase::Cancelling));
                finish(&mut effects, DragEnd::Cancelled);
                DragState::Idle
            } else if point.distance_to(press.origin) > ctx.threshold {
                let session = DragSession {
                    card: press.card,
                    original_position: press.position,
                    drop_target: press.position,
                    origin: press.origin,
                    offset: Point::default(),
                    generation: press.generation,
                };
                effects.push(DragEffect::Phase(DragPhase::Dragging));
                effects.push(DragEffect::Lift {
                    card: session.card.clone(),
                });
                effects.push(DragEffect::ScrollLock(true));
                effects.push(DragEffect::DropZone(true));
                DragState::Dragging(track(session, point, ctx, &mut effects))
            } else {
                DragState::Pressed(press)
            }
        }
        (DragState::Pressed(_), DragInput::Release) => {
            finish(&mut effects, DragEnd::Tapped);
            DragState::Idle
        }
        (DragState::Pressed(_), DragInput::Cancel) => {
            effects.push(DragEffect::Phase(DragPhase::Cancelling));
            finish(&mut effects, DragEnd::Cancelled);
            DragState::Idle
        }

        (DragState::Dragging(session), DragInput::Move(point)) => {
            if is_stale(ctx, session.generation) {
                cancel(session, &mut effects)
            } else {
                DragState::Dragging(track(session, point, ctx, &mut effects))
            }
        }
        (DragState::Dragging(session), DragInput::Release) => {
            if is_stale(ctx, session.generation) {
                cancel(session, &mut effects)
            } else if session.is_noop() {
                effects.push(DragEffect::Phase(DragPhase::Committing));
                effects.push(DragEffect::Restore {
                    card: session.card.clone(),
                    position: session.original_position,
                });
                finish(&mut effects, DragEnd::NoOp);
                DragState::Idle
            } else {
                effects.push(DragEffect::Phase(DragPhase::Committing));
                effects.push(DragEffect::Commit {
                    card: session.card.clone(),
                    from: session.original_position,
                    to: session.drop_target,
                });
                finish(&mut effects, DragEnd::Moved);
                DragState::Idle
            }
        }
        (DragState::Dragging(session), DragInput::Cancel) => cancel(session, &mut effects),
    };
    (next, effects)
}

/// The session is stale when edit mode ended or the card's component was
/// swapped out or unregistered.
fn is_stale(ctx: &DragContext<'_>, generation: u64) -> bool {
    !ctx.edit_mode || ctx.card_generation != Some(generation)
}

fn track(
    mut session: DragSession,
    point: Point,
    ctx: &DragContext<'_>,
    effects: &mut Vec<DragEffect>,
) -> DragSession {
    let delta = point.delta_from(session.origin);
    session.offset = Point::new(delta.x * ctx.horizontal_damping, delta.y);
    effects.push(DragEffect::Translate {
        card: session.card.clone(),
        offset: session.offset,
    });

    let target = resolve_drop_target(point, ctx.bands, ctx.width);
    if target != session.drop_target {
        session.drop_target = target;
        effects.push(DragEffect::DropTarget {
            card: session.card.clone(),
            target,
        });
    }
    session
}

fn cancel(session: DragSession, effects: &mut Vec<DragEffect>) -> DragState {
    effects.push(DragEffect::Phase(DragPhase::Cancelling));
    effects.push(DragEffect::Restore {
        card: session.card.clone(),
        position: session.original_position,
    });
    finish(effects, DragEnd::Cancelled);
    DragState::Idle
}

/// Shared tail of every terminal path.
fn finish(effects: &mut Vec<DragEffect>, end: DragEnd) {
    effects.push(DragEffect::ScrollLock(false));
    effects.push(DragEffect::DropZone(false));
    effects.push(DragEffect::Ended(end));
    effects.push(DragEffect::Phase(DragPhase::Idle));
}
