use std::collections::HashSet;
use std::fmt;

/// Stable card identifier supplied by the host.
pub type CardId = String;

/// Column of a side-by-side row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Left,
    Right,
}

impl Column {
    /// Persisted column index (`0` left, `1` right).
    pub fn index(self) -> u8 {
        match self {
            Column::Left => 0,
            Column::Right => 1,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Column::Left),
            1 => Some(Column::Right),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Column::Left => Column::Right,
            Column::Right => Column::Left,
        }
    }
}

/// Logical address of a slot. Rows past the end mean "append a new row".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub row: usize,
    pub column: Column,
    pub span_full: bool,
}

impl GridPosition {
    pub const fn new(row: usize, column: Column) -> Self {
        Self {
            row,
            column,
            span_full: false,
        }
    }

    pub const fn left(row: usize) -> Self {
        Self::new(row, Column::Left)
    }

    pub const fn right(row: usize) -> Self {
        Self::new(row, Column::Right)
    }

    /// Full-width rows always report the left column.
    pub const fn full(row: usize) -> Self {
        Self {
            row,
            column: Column::Left,
            span_full: true,
        }
    }

    /// True when both positions name the same row and column.
    pub fn same_slot(&self, other: &GridPosition) -> bool {
        self.row == other.row && self.column == other.column
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span_full {
            write!(f, "{}:full", self.row)
        } else {
            write!(f, "{}:{}", self.row, self.column.index())
        }
    }
}

/// A single dashboard row: either one full-width card or up to two
/// side-by-side cards. Fields are private so the two shapes never mix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GridRow {
    left: Option<CardId>,
    right: Option<CardId>,
    full: Option<CardId>,
}

impl GridRow {
    pub fn full_width(card: impl Into<CardId>) -> Self {
        Self {
            full: Some(card.into()),
            ..Self::default()
        }
    }

    pub fn split(left: Option<CardId>, right: Option<CardId>) -> Self {
        Self {
            left,
            right,
            full: None,
        }
    }

    pub fn with_card(column: Column, card: impl Into<CardId>) -> Self {
        let card = Some(card.into());
        match column {
            Column::Left => Self::split(card, None),
            Column::Right => Self::split(None, card),
        }
    }

    pub fn left(&self) -> Option<&CardId> {
        self.left.as_ref()
    }

    pub fn right(&self) -> Option<&CardId> {
        self.right.as_ref()
    }

    pub fn full_width_card(&self) -> Option<&CardId> {
        self.full.as_ref()
    }

    pub fn slot(&self, column: Column) -> Option<&CardId> {
        match column {
            Column::Left => self.left.as_ref(),
            Column::Right => self.right.as_ref(),
        }
    }

    pub fn is_full_width(&self) -> bool {
        self.full.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.full.is_none()
    }

    /// A row is full when it holds a full-width card or both columns.
    pub fn is_full(&self) -> bool {
        self.full.is_some() || (self.left.is_some() && self.right.is_some())
    }

    pub fn contains(&self, card: &str) -> bool {
        self.cards().any(|id| id == card)
    }

    /// Cards in reading order (full-width, then left, then right).
    pub fn cards(&self) -> impl Iterator<Item = &CardId> {
        self.full
            .iter()
            .chain(self.left.iter())
            .chain(self.right.iter())
    }

    /// Fill an empty column slot. Refused for full-width rows.
    fn fill(&mut self, column: Column, card: CardId) -> bool {
        if self.full.is_some() {
            return false;
        }
        let slot = match column {
            Column::Left => &mut self.left,
            Column::Right => &mut self.right,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(card);
        true
    }

    /// Clear whichever field holds `card`, reporting the slot it occupied.
    fn clear(&mut self, card: &str, row: usize) -> Option<GridPosition> {
        if self.full.as_deref() == Some(card) {
            self.full = None;
            return Some(GridPosition::full(row));
        }
        if self.left.as_deref() == Some(card) {
            self.left = None;
            return Some(GridPosition::left(row));
        }
        if self.right.as_deref() == Some(card) {
            self.right = None;
            return Some(GridPosition::right(row));
        }
        None
    }
}

/// Ordered rows of the dashboard, top to bottom.
///
/// Invariants held after every public mutation:
/// - no empty rows,
/// - each card id occupies at most one slot.
///
/// The version counter advances on every structural change so hosts can
/// cheaply tell whether a snapshot is stale. Equality ignores the version.
#[derive(Debug, Clone, Default)]
pub struct GridModel {
    rows: Vec<GridRow>,
    version: u64,
}

impl PartialEq for GridModel {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for GridModel {}

impl GridModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from raw rows. Empty rows are dropped and any card seen
    /// a second time is cleared from the later slot.
    pub fn from_rows(rows: impl IntoIterator<Item = GridRow>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for mut row in rows {
            let ids: Vec<CardId> = row.cards().cloned().collect();
            for id in ids {
                if !seen.insert(id.clone()) {
                    row.clear(&id, 0);
                }
            }
            if !row.is_empty() {
                kept.push(row);
            }
        }
        Self {
            rows: kept,
            version: 0,
        }
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&GridRow> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// All cards in row order.
    pub fn cards(&self) -> impl Iterator<Item = &CardId> {
        self.rows.iter().flat_map(GridRow::cards)
    }

    pub fn contains(&self, card: &str) -> bool {
        self.rows.iter().any(|row| row.contains(card))
    }

    pub fn position_of(&self, card: &str) -> Option<GridPosition> {
        self.rows.iter().enumerate().find_map(|(index, row)| {
            if row.full.as_deref() == Some(card) {
                Some(GridPosition::full(index))
            } else if row.left.as_deref() == Some(card) {
                Some(GridPosition::left(index))
            } else if row.right.as_deref() == Some(card) {
                Some(GridPosition::right(index))
            } else {
                None
            }
        })
    }

    /// Out-of-range rows are never full.
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(GridRow::is_full)
    }

    /// Place `card` at `position`.
    ///
    /// A `span_full` position inserts a new full-width row. Otherwise the
    /// requested column is filled in place when the target row is a
    /// side-by-side row with that slot free; in every other case a new row
    /// holding the card is inserted at the (clamped) row index, pushing the
    /// existing rows down. A card already present elsewhere is moved.
    pub fn insert_at(&mut self, position: GridPosition, card: impl Into<CardId>) {
        let card = card.into();
        self.remove_card(&card);

        let index = position.row.min(self.rows.len());
        if position.span_full {
            self.rows.insert(index, GridRow::full_width(card));
        } else {
            let filled = match self.rows.get_mut(index) {
                Some(row) => row.fill(position.column, card.clone()),
                None => false,
            };
            if !filled {
                self.rows
                    .insert(index, GridRow::with_card(position.column, card));
            }
        }
        self.bump();
        self.prune_empty_rows();
    }

    /// Remove `card`, returning the slot it occupied before removal.
    pub fn remove_card(&mut self, card: &str) -> Option<GridPosition> {
        let removed = self
            .rows
            .iter_mut()
            .enumerate()
            .find_map(|(index, row)| row.clear(card, index));
        if removed.is_some() {
            self.bump();
            self.prune_empty_rows();
        }
        removed
    }

    /// Drop every empty row, re-indexing the remainder contiguously.
    pub fn prune_empty_rows(&mut self) {
        let before = self.rows.len();
        self.rows.retain(|row| !row.is_empty());
        if self.rows.len() != before {
            self.bump();
        }
    }

    /// Check both model invariants. Holds for every value reachable through
    /// the public API; exposed for tests and host-side assertions.
    pub fn is_well_formed(&self) -> bool {
        let mut seen = HashSet::new();
        self.rows.iter().all(|row| {
            !row.is_empty()
                && !(row.full.is_some() && (row.left.is_some() || row.right.is_some()))
                && row.cards().all(|id| seen.insert(id.as_str()))
        })
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
