//! Card type descriptors consulted by the move reducer.

use std::collections::HashSet;

use crate::grid::CardId;

/// Lookup of per-card placement capabilities.
pub trait CardTypes {
    /// Whether the card may share a row with another card. Unknown ids
    /// default to `true`.
    fn can_be_side_by_side(&self, card: &str) -> bool;
}

impl<F> CardTypes for F
where
    F: Fn(&str) -> bool,
{
    fn can_be_side_by_side(&self, card: &str) -> bool {
        self(card)
    }
}

/// Fixed set of cards that must always span the full width.
#[derive(Debug, Clone, Default)]
pub struct StaticCardTypes {
    wide_only: HashSet<CardId>,
}

impl StaticCardTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wide_only<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CardId>,
    {
        Self {
            wide_only: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl CardTypes for StaticCardTypes {
    fn can_be_side_by_side(&self, card: &str) -> bool {
        !self.wide_only.contains(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_cards_default_to_side_by_side() {
        let types = StaticCardTypes::wide_only(["spectrum"]);
        assert!(!types.can_be_side_by_side("spectrum"));
        assert!(types.can_be_side_by_side("dose"));
    }

    #[test]
    fn closures_act_as_descriptors() {
        let types = |card: &str| card != "chart";
        assert!(!types.can_be_side_by_side("chart"));
    }
}
