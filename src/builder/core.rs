use std::collections::HashSet;

use crate::grid::{CardId, Column, GridModel, GridPosition};
use crate::registry::CardRegistry;

/// Drag affordance attached to a populated slot in edit mode. It is the only
/// surface that can start a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragHandle {
    pub card: CardId,
    pub position: GridPosition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotNode {
    Card {
        card: CardId,
        position: GridPosition,
        handle: Option<DragHandle>,
    },
    /// Inert filler for an empty or unresolvable slot. Dashed in edit mode to
    /// mark a drop target.
    Placeholder {
        position: GridPosition,
        height: f32,
        dashed: bool,
    },
}

impl SlotNode {
    pub fn position(&self) -> GridPosition {
        match self {
            SlotNode::Card { position, .. } | SlotNode::Placeholder { position, .. } => *position,
        }
    }

    pub fn card(&self) -> Option<&CardId> {
        match self {
            SlotNode::Card { card, .. } => Some(card),
            SlotNode::Placeholder { .. } => None,
        }
    }

    pub fn handle(&self) -> Option<&DragHandle> {
        match self {
            SlotNode::Card { handle, .. } => handle.as_ref(),
            SlotNode::Placeholder { .. } => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, SlotNode::Placeholder { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowNode {
    Full(SlotNode),
    Split { left: SlotNode, right: SlotNode },
}

impl RowNode {
    pub fn slots(&self) -> Vec<&SlotNode> {
        match self {
            RowNode::Full(slot) => vec![slot],
            RowNode::Split { left, right } => vec![left, right],
        }
    }

    /// True when every slot in the row is a placeholder.
    pub fn is_inert(&self) -> bool {
        self.slots().iter().all(|slot| slot.is_placeholder())
    }
}

/// Renderable arrangement of the dashboard, rebuilt after each change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerTree {
    pub rows: Vec<RowNode>,
    pub edit_mode: bool,
}

impl ContainerTree {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn slots(&self) -> impl Iterator<Item = &SlotNode> {
        self.rows.iter().flat_map(RowNode::slots)
    }

    pub fn handles(&self) -> impl Iterator<Item = &DragHandle> {
        self.slots().filter_map(SlotNode::handle)
    }

    /// Drag handle bound to `position`, if one is rendered there.
    pub fn handle_at(&self, position: GridPosition) -> Option<&DragHandle> {
        self.handles()
            .find(|handle| handle.position.same_slot(&position))
    }

    pub fn slot_of(&self, card: &str) -> Option<&SlotNode> {
        self.slots()
            .find(|slot| slot.card().is_some_and(|id| id == card))
    }
}

/// Build the container tree for `model`.
///
/// Placed components are re-parented into their slot through the registry
/// (a no-op when already there); registered components that are no longer
/// placed are detached. Cards missing from the registry render as
/// placeholders.
pub fn build(
    model: &GridModel,
    registry: &mut CardRegistry,
    edit_mode: bool,
    placeholder_height: f32,
) -> ContainerTree {
    let mut rows = Vec::with_capacity(model.row_count());

    for (index, row) in model.rows().iter().enumerate() {
        let mut slot = |card: Option<&CardId>, position: GridPosition| {
            slot_node(card, position, registry, edit_mode, placeholder_height)
        };
        let node = if let Some(card) = row.full_width_card() {
            RowNode::Full(slot(Some(card), GridPosition::full(index)))
        } else {
            RowNode::Split {
                left: slot(row.slot(Column::Left), GridPosition::left(index)),
                right: slot(row.slot(Column::Right), GridPosition::right(index)),
            }
        };
        rows.push(node);
    }

    {
        let placed: HashSet<&str> = rows
            .iter()
            .flat_map(RowNode::slots)
            .filter_map(SlotNode::card)
            .map(String::as_str)
            .collect();
        registry.release_unplaced(&placed);
    }

    ContainerTree { rows, edit_mode }
}

fn slot_node(
    card: Option<&CardId>,
    position: GridPosition,
    registry: &mut CardRegistry,
    edit_mode: bool,
    placeholder_height: f32,
) -> SlotNode {
    match card {
        Some(card) if registry.attach(card, position) => SlotNode::Card {
            card: card.clone(),
            position,
            handle: edit_mode.then(|| DragHandle {
                card: card.clone(),
                position,
            }),
        },
        _ => SlotNode::Placeholder {
            position,
            height: placeholder_height,
            dashed: edit_mode,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DashboardItem, decode};
    use crate::registry::TestCard;

    fn registry_with(ids: &[&str]) -> CardRegistry {
        let mut registry = CardRegistry::new();
        for id in ids {
            registry.register(*id, TestCard::named(id));
        }
        registry
    }

    #[test]
    fn split_row_with_gap_gets_placeholder() {
        let model = decode(&[DashboardItem::left("dose", 0)]);
        let mut registry = registry_with(&["dose"]);
        let tree = build(&model, &mut registry, false, 96.0);

        assert_eq!(tree.row_count(), 1);
        let RowNode::Split { left, right } = &tree.rows[0] else {
            panic!("expected split row");
        };
        assert_eq!(left.card().map(String::as_str), Some("dose"));
        assert_eq!(
            *right,
            SlotNode::Placeholder {
                position: GridPosition::right(0),
                height: 96.0,
                dashed: false,
            }
        );
        assert!(left.handle().is_none());
    }

    #[test]
    fn edit_mode_adds_handles_and_dashes_placeholders() {
        let model = decode(&[DashboardItem::right("count", 0), DashboardItem::full("chart", 1)]);
        let mut registry = registry_with(&["count", "chart"]);
        let tree = build(&model, &mut registry, true, 80.0);

        let handles: Vec<_> = tree.handles().map(|h| h.position).collect();
        assert_eq!(handles, vec![GridPosition::right(0), GridPosition::full(1)]);
        assert!(tree.slots().any(|slot| matches!(
            slot,
            SlotNode::Placeholder { dashed: true, .. }
        )));
        assert!(tree.handle_at(GridPosition::full(1)).is_some());
    }

    #[test]
    fn unregistered_card_renders_as_placeholder() {
        let model = decode(&[DashboardItem::full("ghost", 0)]);
        let mut registry = CardRegistry::new();
        let tree = build(&model, &mut registry, true, 96.0);
        assert!(tree.rows[0].is_inert());
        assert_eq!(tree.handles().count(), 0);
    }

    #[test]
    fn rebuild_does_not_reattach_unchanged_cards() {
        let model = decode(&[DashboardItem::left("dose", 0)]);
        let card = TestCard::named("Dose");
        let mut registry = CardRegistry::new();
        registry.register("dose", card.clone());

        let first = build(&model, &mut registry, false, 96.0);
        let second = build(&model, &mut registry, false, 96.0);
        assert_eq!(first, second);
        assert_eq!(card.calls(), vec!["attach 0:0"]);
    }

    #[test]
    fn cards_dropped_from_model_are_detached() {
        let mut registry = registry_with(&[]);
        let card = TestCard::named("Dose");
        registry.register("dose", card.clone());
        build(&decode(&[DashboardItem::left("dose", 0)]), &mut registry, false, 96.0);
        build(&GridModel::new(), &mut registry, false, 96.0);
        assert_eq!(card.calls(), vec!["attach 0:0", "detach"]);
    }
}
