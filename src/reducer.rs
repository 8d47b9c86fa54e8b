//! Move reducer: the single place deciding how a moved card lands.

use crate::grid::{GridModel, GridPosition};

/// Move `card` from `from` to `to`, returning the new model.
///
/// 1. The card is removed (empty rows pruned, which may shift later rows up).
/// 2. `to.row` is clamped into `0..=row_count` of the post-removal model.
/// 3. Cards that cannot sit side by side, or a `span_full` target, always
///    get a new full-width row at that index.
/// 4. Otherwise the requested column of the target row is filled in place
///    when free; a full-width target row or an occupied slot gets a new
///    row inserted at the index, pushing the rest down.
/// 5. An index at the end appends a new row.
///
/// Same-slot moves and cards absent from the model return the input
/// unchanged.
pub fn move_card(
    model: &GridModel,
    card: &str,
    from: GridPosition,
    to: GridPosition,
    can_be_side_by_side: bool,
) -> GridModel {
    if from.same_slot(&to) && from.span_full == to.span_full {
        return model.clone();
    }

    let mut next = model.clone();
    if next.remove_card(card).is_none() {
        return model.clone();
    }

    let row = to.row.min(next.row_count());
    let target = if !can_be_side_by_side || to.span_full {
        GridPosition::full(row)
    } else {
        GridPosition::new(row, to.column)
    };
    next.insert_at(target, card);
    next.prune_empty_rows();
    next
}
