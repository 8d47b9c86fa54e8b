use std::collections::BTreeMap;

use blake3::Hash;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::{CardId, Column, GridModel, GridRow};

/// Persisted projection of one occupied slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardItem {
    pub id: CardId,
    pub row: usize,
    pub column: u8,
    #[serde(default)]
    pub span_full: bool,
}

impl DashboardItem {
    pub fn new(id: impl Into<CardId>, row: usize, column: u8, span_full: bool) -> Self {
        Self {
            id: id.into(),
            row,
            column,
            span_full,
        }
    }

    pub fn left(id: impl Into<CardId>, row: usize) -> Self {
        Self::new(id, row, 0, false)
    }

    pub fn right(id: impl Into<CardId>, row: usize) -> Self {
        Self::new(id, row, 1, false)
    }

    pub fn full(id: impl Into<CardId>, row: usize) -> Self {
        Self::new(id, row, 0, true)
    }
}

/// Rebuild a grid from persisted items.
///
/// Items are grouped by row number; gaps in the numbering collapse. A lone
/// item becomes a full-width, left-only or right-only row. With two or more
/// items the first at column 0 becomes the left card and the first at
/// column 1 the right card; anything else in that row is dropped. A card id
/// repeated across rows keeps its first placement.
pub fn decode(items: &[DashboardItem]) -> GridModel {
    let mut by_row: BTreeMap<usize, Vec<&DashboardItem>> = BTreeMap::new();
    for item in items {
        by_row.entry(item.row).or_default().push(item);
    }

    let rows = by_row.into_values().filter_map(|group| match group.as_slice() {
        [single] if single.span_full => Some(GridRow::full_width(single.id.clone())),
        [single] => Column::from_index(single.column)
            .map(|column| GridRow::with_card(column, single.id.clone())),
        many => {
            let first_in = |column: Column| {
                many.iter()
                    .find(|item| item.column == column.index())
                    .map(|item| item.id.clone())
            };
            Some(GridRow::split(first_in(Column::Left), first_in(Column::Right)))
        }
    });

    GridModel::from_rows(rows)
}

/// Flatten a grid into one item per occupied slot, rows numbered contiguously.
pub fn encode(model: &GridModel) -> Vec<DashboardItem> {
    let mut items = Vec::new();
    for (index, row) in model.rows().iter().enumerate() {
        if let Some(id) = row.full_width_card() {
            items.push(DashboardItem::full(id.clone(), index));
            continue;
        }
        if let Some(id) = row.left() {
            items.push(DashboardItem::left(id.clone(), index));
        }
        if let Some(id) = row.right() {
            items.push(DashboardItem::right(id.clone(), index));
        }
    }
    items
}

pub fn to_json(items: &[DashboardItem]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

pub fn from_json(json: &str) -> Result<Vec<DashboardItem>> {
    Ok(serde_json::from_str(json)?)
}

/// Content hash of a layout, independent of item order.
pub fn digest(items: &[DashboardItem]) -> Hash {
    let mut sorted: Vec<&DashboardItem> = items.iter().collect();
    sorted.sort_by(|a, b| (a.row, a.column, &a.id).cmp(&(b.row, b.column, &b.id)));

    let mut hasher = blake3::Hasher::new();
    for item in sorted {
        hasher.update(&(item.row as u64).to_le_bytes());
        hasher.update(&[item.column, u8::from(item.span_full)]);
        hasher.update(item.id.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}
