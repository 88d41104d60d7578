//! Grid dimensions per viewport.

use serde::{Deserialize, Serialize};

use crate::placement::Placement;
use crate::viewport::{Viewport, ViewportMap};

/// Smallest allowed column count.
pub const MIN_COLS: u32 = 1;
/// Largest allowed column count.
pub const MAX_COLS: u32 = 24;
/// Smallest allowed row count.
pub const MIN_ROWS: u32 = 1;
/// Largest allowed row count.
pub const MAX_ROWS: u32 = 48;

/// The `cols × rows` extent of one viewport's grid.
///
/// Values built through [`GridDimensions::new`] or the `with_*` helpers are
/// always within [`MIN_COLS`]..=[`MAX_COLS`] and [`MIN_ROWS`]..=[`MAX_ROWS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    /// Column count.
    pub cols: u32,
    /// Row count.
    pub rows: u32,
}

impl GridDimensions {
    /// Create dimensions, clamping both values into the global bounds.
    #[must_use]
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols: clamp_cols(cols),
            rows: clamp_rows(rows),
        }
    }

    /// Initial grid for a viewport.
    #[must_use]
    pub const fn default_for(viewport: Viewport) -> Self {
        match viewport {
            Viewport::Desktop => Self { cols: 6, rows: 2 },
            Viewport::Tablet => Self { cols: 4, rows: 2 },
            Viewport::Mobile => Self { cols: 1, rows: 2 },
        }
    }

    /// Copy with a new (clamped) column count.
    #[must_use]
    pub fn with_cols(self, cols: u32) -> Self {
        Self {
            cols: clamp_cols(cols),
            ..self
        }
    }

    /// Copy with a new (clamped) row count.
    #[must_use]
    pub fn with_rows(self, rows: u32) -> Self {
        Self {
            rows: clamp_rows(rows),
            ..self
        }
    }

    /// Copy with one more row, capped at [`MAX_ROWS`].
    #[must_use]
    pub fn with_added_row(self) -> Self {
        self.with_rows(self.rows.saturating_add(1))
    }

    /// Copy with one more column, capped at [`MAX_COLS`].
    #[must_use]
    pub fn with_added_column(self) -> Self {
        self.with_cols(self.cols.saturating_add(1))
    }

    /// Copy with one row fewer, or `None` when already at [`MIN_ROWS`].
    #[must_use]
    pub fn without_row(self) -> Option<Self> {
        (self.rows > MIN_ROWS).then(|| Self {
            rows: self.rows - 1,
            ..self
        })
    }

    /// Copy with one column fewer, or `None` when already at [`MIN_COLS`].
    #[must_use]
    pub fn without_column(self) -> Option<Self> {
        (self.cols > MIN_COLS).then(|| Self {
            cols: self.cols - 1,
            ..self
        })
    }

    /// Whether both values lie inside the global bounds.
    #[must_use]
    pub const fn is_within_bounds(&self) -> bool {
        self.cols >= MIN_COLS && self.cols <= MAX_COLS && self.rows >= MIN_ROWS && self.rows <= MAX_ROWS
    }

    /// Whether a placement lies entirely inside this grid.
    #[must_use]
    pub const fn contains(&self, placement: &Placement) -> bool {
        placement.fits(self.cols, self.rows)
    }
}

/// Grid dimensions for every viewport.
pub type GridPerViewport = ViewportMap<GridDimensions>;

/// The grid every viewport starts with.
#[must_use]
pub fn default_grid() -> GridPerViewport {
    ViewportMap::from_fn(GridDimensions::default_for)
}

fn clamp_cols(cols: u32) -> u32 {
    cols.clamp(MIN_COLS, MAX_COLS)
}

fn clamp_rows(rows: u32) -> u32 {
    rows.clamp(MIN_ROWS, MAX_ROWS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_into_bounds() {
        assert_eq!(GridDimensions::new(0, 0), GridDimensions { cols: 1, rows: 1 });
        assert_eq!(
            GridDimensions::new(100, 100),
            GridDimensions { cols: 24, rows: 48 }
        );
    }

    #[test]
    fn defaults_per_viewport() {
        let grid = default_grid();
        assert_eq!(grid.desktop, GridDimensions { cols: 6, rows: 2 });
        assert_eq!(grid.tablet, GridDimensions { cols: 4, rows: 2 });
        assert_eq!(grid.mobile, GridDimensions { cols: 1, rows: 2 });
        assert!(grid.iter().all(|(_, g)| g.is_within_bounds()));
    }

    #[test]
    fn growth_is_capped() {
        let g = GridDimensions::new(MAX_COLS, MAX_ROWS);
        assert_eq!(g.with_added_column(), g);
        assert_eq!(g.with_added_row(), g);
        assert_eq!(
            GridDimensions::new(3, 3).with_added_row(),
            GridDimensions::new(3, 4)
        );
    }

    #[test]
    fn shrinking_stops_at_minimum() {
        let g = GridDimensions::new(1, 1);
        assert_eq!(g.without_row(), None);
        assert_eq!(g.without_column(), None);
        assert_eq!(
            GridDimensions::new(2, 2).without_column(),
            Some(GridDimensions::new(1, 2))
        );
    }

    #[test]
    fn contains_checks_placement_fit() {
        let g = GridDimensions::new(6, 3);
        assert!(g.contains(&Placement::new(5, 3, 2, 1)));
        assert!(!g.contains(&Placement::new(5, 3, 3, 1)));
    }
}
