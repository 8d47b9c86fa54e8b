use crate::builder::{ContainerTree, RowNode, SlotNode};
use crate::config::EngineSettings;
use crate::grid::{CardId, GridPosition};

use super::{Point, Rect, RowBand, Size};

/// Resolved rectangle for one slot of the container tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedSlot {
    pub position: GridPosition,
    pub card: Option<CardId>,
    pub rect: Rect,
    /// Hit area of the drag handle, present only for handled slots.
    pub handle: Option<Rect>,
}

/// Geometry of a built container tree inside a viewport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolvedLayout {
    pub width: f32,
    pub bands: Vec<RowBand>,
    pub slots: Vec<SolvedSlot>,
}

impl SolvedLayout {
    pub fn content_height(&self) -> f32 {
        self.bands.last().map(RowBand::bottom).unwrap_or(0.0)
    }

    /// Drag handle under `point`, as the handle's bound grid position.
    pub fn handle_at(&self, point: Point) -> Option<GridPosition> {
        self.slots
            .iter()
            .find(|slot| slot.handle.is_some_and(|rect| rect.contains(point)))
            .map(|slot| slot.position)
    }

    pub fn slot_rect(&self, position: GridPosition) -> Option<Rect> {
        self.slots
            .iter()
            .find(|slot| slot.position.same_slot(&position))
            .map(|slot| slot.rect)
    }
}

/// Stack the tree's rows top to bottom inside `viewport`.
///
/// Rows holding at least one card use `row_height`, fully inert rows use
/// `placeholder_height`. Split rows divide the width into two equal halves
/// separated by `column_gap`. Handles occupy a square in the slot's
/// top-right corner.
pub fn solve(tree: &ContainerTree, viewport: Size, settings: &EngineSettings) -> SolvedLayout {
    let width = viewport.width.max(0.0);
    let half = ((width - settings.column_gap) / 2.0).max(0.0);
    let mut top = 0.0;
    let mut bands = Vec::with_capacity(tree.row_count());
    let mut slots = Vec::new();

    for row in &tree.rows {
        let height = if row.is_inert() {
            settings.placeholder_height
        } else {
            settings.row_height
        };

        match row {
            RowNode::Full(slot) => {
                slots.push(solve_slot(slot, Rect::new(0.0, top, width, height), settings));
            }
            RowNode::Split { left, right } => {
                slots.push(solve_slot(left, Rect::new(0.0, top, half, height), settings));
                let x = half + settings.column_gap;
                slots.push(solve_slot(right, Rect::new(x, top, half, height), settings));
            }
        }

        bands.push(RowBand::new(top, height));
        top += height + settings.row_gap;
    }

    SolvedLayout {
        width,
        bands,
        slots,
    }
}

fn solve_slot(slot: &SlotNode, rect: Rect, settings: &EngineSettings) -> SolvedSlot {
    let handle = slot.handle().map(|_| {
        let size = settings.handle_size.min(rect.width).min(rect.height);
        Rect::new(rect.right() - size, rect.y, size, size)
    });
    SolvedSlot {
        position: slot.position(),
        card: slot.card().cloned(),
        rect,
        handle,
    }
}
