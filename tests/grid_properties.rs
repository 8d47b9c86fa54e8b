//! Property-based invariant tests for the grid model, codec and reducer.
//!
//! Verifies:
//! 1. Random insert/remove/move sequences never leave empty rows or
//!    duplicate cards.
//! 2. `decode(encode(m)) == m` for every reachable model.
//! 3. Moving a card onto its own slot leaves the model unchanged.
//! 4. Decoding arbitrary (even malformed) item lists yields a well-formed model.

use dashgrid::codec::{DashboardItem, decode, encode};
use dashgrid::{Column, GridModel, GridPosition, move_card};
use proptest::prelude::*;

const CARDS: [&str; 6] = ["dose", "count", "chart", "spectrum", "safety", "help"];

#[derive(Debug, Clone)]
enum Op {
    Insert { card: usize, position: GridPosition },
    Remove { card: usize },
    Move { card: usize, to: GridPosition, side_by_side: bool },
}

fn arb_position() -> impl Strategy<Value = GridPosition> {
    (0usize..6, any::<bool>(), any::<bool>()).prop_map(|(row, right, full)| {
        if full {
            GridPosition::full(row)
        } else if right {
            GridPosition::new(row, Column::Right)
        } else {
            GridPosition::new(row, Column::Left)
        }
    })
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..CARDS.len(), arb_position()).prop_map(|(card, position)| Op::Insert { card, position }),
        (0..CARDS.len()).prop_map(|card| Op::Remove { card }),
        (0..CARDS.len(), arb_position(), any::<bool>()).prop_map(|(card, to, side_by_side)| {
            Op::Move {
                card,
                to,
                side_by_side,
            }
        }),
    ]
}

fn apply(model: &mut GridModel, op: &Op) {
    match op {
        Op::Insert { card, position } => model.insert_at(*position, CARDS[*card]),
        Op::Remove { card } => {
            model.remove_card(CARDS[*card]);
        }
        Op::Move {
            card,
            to,
            side_by_side,
        } => {
            if let Some(from) = model.position_of(CARDS[*card]) {
                *model = move_card(model, CARDS[*card], from, *to, *side_by_side);
            }
        }
    }
}

fn arb_model() -> impl Strategy<Value = GridModel> {
    prop::collection::vec(arb_op(), 0..40).prop_map(|ops| {
        let mut model = GridModel::new();
        for op in &ops {
            apply(&mut model, op);
        }
        model
    })
}

fn arb_item() -> impl Strategy<Value = DashboardItem> {
    (0..CARDS.len(), 0usize..8, 0u8..3, any::<bool>())
        .prop_map(|(card, row, column, span_full)| {
            DashboardItem::new(CARDS[card], row, column, span_full)
        })
}

proptest! {
    #[test]
    fn op_sequences_preserve_invariants(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut model = GridModel::new();
        for op in &ops {
            apply(&mut model, op);
            prop_assert!(model.is_well_formed(), "broken after {:?}: {:?}", op, model);
        }
    }

    #[test]
    fn encode_decode_round_trip(model in arb_model()) {
        prop_assert_eq!(decode(&encode(&model)), model);
    }

    #[test]
    fn moving_to_own_slot_is_noop(model in arb_model(), pick in any::<prop::sample::Index>()) {
        let cards: Vec<String> = model.cards().cloned().collect();
        prop_assume!(!cards.is_empty());
        let card = pick.get(&cards);
        let from = model.position_of(card).unwrap();
        let moved = move_card(&model, card, from, from, true);
        prop_assert_eq!(moved, model);
    }

    #[test]
    fn decode_tolerates_malformed_items(items in prop::collection::vec(arb_item(), 0..20)) {
        let model = decode(&items);
        prop_assert!(model.is_well_formed());
        prop_assert!(encode(&model).len() <= items.len());
    }
}
