use crate::geometry::{Point, RowBand};
use crate::grid::{Column, GridPosition};

/// Candidate drop slot for a pointer at `point`.
///
/// The column comes from which half of the viewport the pointer is in. Rows
/// are scanned top to bottom: the first row whose vertical midpoint lies
/// below the pointer is the insertion row; past every midpoint the target is
/// one past the last row. The result is always within `0..=bands.len()`.
pub fn resolve_drop_target(point: Point, bands: &[RowBand], width: f32) -> GridPosition {
    let column = if point.x < width / 2.0 {
        Column::Left
    } else {
        Column::Right
    };
    let row = bands
        .iter()
        .position(|band| point.y < band.mid())
        .unwrap_or(bands.len());
    GridPosition::new(row, column)
}
