//! Placement algebra.
//!
//! A [`Placement`] is an anchor cell plus a span, 1-based, scoped to one
//! viewport's grid. Everything in this module is a pure function of a
//! placement and the grid bounds; the functions return the placement that
//! should be stored next, or `None` when the element must become unplaced.
//!
//! A placement `p` fits a `cols × rows` grid when
//!
//! ```text
//! p.col >= 1 && p.row >= 1
//! p.col + p.col_span - 1 <= cols
//! p.row + p.row_span - 1 <= rows
//! ```
//!
//! Every `Some` returned by [`clamp_placement`] fits. [`move_to`] and
//! [`resize_to`] never return a placement that fits worse than their input.

use serde::{Deserialize, Serialize};

/// An element's anchor cell and span within one viewport's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// 1-based anchor column.
    pub col: u32,
    /// 1-based anchor row.
    pub row: u32,
    /// Number of columns covered, at least 1.
    pub col_span: u32,
    /// Number of rows covered, at least 1.
    pub row_span: u32,
}

impl Placement {
    /// Create a placement.
    #[must_use]
    pub const fn new(col: u32, row: u32, col_span: u32, row_span: u32) -> Self {
        Self {
            col,
            row,
            col_span,
            row_span,
        }
    }

    /// A 1×1 placement at the given cell.
    #[must_use]
    pub const fn cell(col: u32, row: u32) -> Self {
        Self::new(col, row, 1, 1)
    }

    /// Last column covered (inclusive).
    #[must_use]
    pub const fn end_col(&self) -> u32 {
        self.col.saturating_add(self.col_span.saturating_sub(1))
    }

    /// Last row covered (inclusive).
    #[must_use]
    pub const fn end_row(&self) -> u32 {
        self.row.saturating_add(self.row_span.saturating_sub(1))
    }

    /// Whether this placement lies entirely inside a `cols × rows` grid.
    #[must_use]
    pub const fn fits(&self, cols: u32, rows: u32) -> bool {
        self.col >= 1
            && self.row >= 1
            && self.col_span >= 1
            && self.row_span >= 1
            && self.end_col() <= cols
            && self.end_row() <= rows
    }
}

/// Grid axis, used to share the row and column variants of the algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Row,
    Column,
}

impl Axis {
    const fn start(self, p: &Placement) -> u32 {
        match self {
            Self::Row => p.row,
            Self::Column => p.col,
        }
    }

    const fn span(self, p: &Placement) -> u32 {
        match self {
            Self::Row => p.row_span,
            Self::Column => p.col_span,
        }
    }

    const fn with(self, p: Placement, start: u32, span: u32) -> Placement {
        match self {
            Self::Row => Placement {
                row: start,
                row_span: span,
                ..p
            },
            Self::Column => Placement {
                col: start,
                col_span: span,
                ..p
            },
        }
    }
}

/// Cells available from `start` to the end of an axis of length `extent`.
const fn room(extent: u32, start: u32) -> u32 {
    extent.saturating_add(1).saturating_sub(start)
}

/// `span` shrunk to the available room, never below 1.
fn fit_span(span: u32, extent: u32, start: u32) -> u32 {
    span.min(room(extent, start)).max(1)
}

/// Shrink a placement's spans so it fits a `cols × rows` grid.
///
/// Returns `None` when the anchor is not a valid cell of the grid; the
/// caller must clear the placement. Idempotent on placements that fit.
#[must_use]
pub fn clamp_placement(p: Placement, cols: u32, rows: u32) -> Option<Placement> {
    if p.col < 1 || p.row < 1 {
        return None;
    }
    let clamped = Placement {
        col_span: fit_span(p.col_span, cols, p.col),
        row_span: fit_span(p.row_span, rows, p.row),
        ..p
    };
    clamped.fits(cols, rows).then_some(clamped)
}

fn adjust_after_remove(
    p: Placement,
    axis: Axis,
    removed: u32,
    new_extent: u32,
) -> Option<Placement> {
    let start = axis.start(&p);
    let span = axis.span(&p);
    let end = start.saturating_add(span.saturating_sub(1));

    let next = if end < removed {
        if start > removed {
            Some(axis.with(p, start - 1, span))
        } else {
            Some(p)
        }
    } else if start > removed {
        Some(axis.with(p, start - 1, span))
    } else if start == removed {
        (span > 1).then(|| axis.with(p, start, span - 1))
    } else {
        Some(axis.with(p, start, span - 1))
    };

    next.filter(|n| {
        let start = axis.start(n);
        start >= 1 && start.saturating_add(axis.span(n).saturating_sub(1)) <= new_extent
    })
}

/// Recompute a placement after the 1-based row `removed_row` is deleted
/// from a grid that now has `new_rows` rows.
///
/// Placements below the removed row shift up, placements that start on it
/// lose one row (or vanish when they were a single row), and placements
/// spanning across it shrink by one.
#[must_use]
pub fn adjust_after_remove_row(
    p: Placement,
    removed_row: u32,
    new_rows: u32,
) -> Option<Placement> {
    adjust_after_remove(p, Axis::Row, removed_row, new_rows)
}

/// Column-axis mirror of [`adjust_after_remove_row`].
#[must_use]
pub fn adjust_after_remove_column(
    p: Placement,
    removed_col: u32,
    new_cols: u32,
) -> Option<Placement> {
    adjust_after_remove(p, Axis::Column, removed_col, new_cols)
}

/// Move a placement's anchor to `(col, row)`, keeping as much of its span
/// as still fits. Returns `current` unchanged if the target is outside the
/// grid.
#[must_use]
pub fn move_to(current: Placement, col: u32, row: u32, cols: u32, rows: u32) -> Placement {
    let col = col.max(1);
    let row = row.max(1);
    let candidate = Placement {
        col,
        row,
        col_span: fit_span(current.col_span, cols, col),
        row_span: fit_span(current.row_span, rows, row),
    };
    clamp_placement(candidate, cols, rows).unwrap_or(current)
}

/// Change a placement's span, keeping its anchor fixed. Requests are
/// saturated to the grid edge and floored at 1. Returns `current`
/// unchanged if the anchor itself no longer fits.
#[must_use]
pub fn resize_to(
    current: Placement,
    col_span: u32,
    row_span: u32,
    cols: u32,
    rows: u32,
) -> Placement {
    let candidate = Placement {
        col_span: fit_span(col_span, cols, current.col),
        row_span: fit_span(row_span, rows, current.row),
        ..current
    };
    clamp_placement(candidate, cols, rows).unwrap_or(current)
}
