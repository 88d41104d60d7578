//! Pointer geometry for hosts that render the grid.
//!
//! A host lays the grid out as `cols × rows` equal cells separated by a
//! fixed gap. [`GridGeometry`] maps pointer offsets (relative to the grid's
//! top-left corner) back to cells, and [`ResizeDrag`] turns a stream of
//! pointer moves into [`Action::ResizePlacement`] requests.
//!
//! A drag is not a transaction. Each move produces an independent action
//! that the store commits on its own; releasing the pointer just stops
//! producing actions and keeps whatever the last move committed.

use crate::action::Action;
use crate::element::ElementId;
use crate::placement::Placement;
use crate::state::LayoutState;
use crate::viewport::Viewport;

/// Gap between cells, in pixels.
pub const DEFAULT_GAP: f32 = 8.0;

/// On-screen size of a rendered grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Rendered width in pixels.
    pub width: f32,
    /// Rendered height in pixels.
    pub height: f32,
    /// Column count.
    pub cols: u32,
    /// Row count.
    pub rows: u32,
    /// Gap between cells in pixels.
    pub gap: f32,
}

impl GridGeometry {
    /// Geometry with the default gap.
    #[must_use]
    pub fn new(width: f32, height: f32, cols: u32, rows: u32) -> Self {
        Self {
            width,
            height,
            cols: cols.max(1),
            rows: rows.max(1),
            gap: DEFAULT_GAP,
        }
    }

    /// Width and height of one cell.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_size(&self) -> (f32, f32) {
        let cols = self.cols as f32;
        let rows = self.rows as f32;
        (
            (self.width - self.gap * (cols - 1.0)) / cols,
            (self.height - self.gap * (rows - 1.0)) / rows,
        )
    }

    /// 0-based `(col, row)` under a pointer offset. Not clamped: offsets
    /// left of or above the grid give negative indices.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_index(&self, x: f32, y: f32) -> (i64, i64) {
        let (cell_w, cell_h) = self.cell_size();
        let col = (x / (cell_w + self.gap)).floor();
        let row = (y / (cell_h + self.gap)).floor();
        (col as i64, row as i64)
    }

    /// 1-based cell under a pointer offset, or `None` outside the grid.
    #[must_use]
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        let (col, row) = self.cell_index(x, y);
        let col = u32::try_from(col).ok().filter(|c| *c < self.cols)?;
        let row = u32::try_from(row).ok().filter(|r| *r < self.rows)?;
        Some((col + 1, row + 1))
    }

    /// Spans for resizing `anchor` so its far corner follows the pointer.
    ///
    /// The far corner never moves before the anchor and never past the last
    /// cell, so both spans are at least 1.
    #[must_use]
    pub fn resize_spans(&self, anchor: Placement, x: f32, y: f32) -> (u32, u32) {
        let (col, row) = self.cell_index(x, y);
        let span = |start: u32, index: i64, extent: u32| -> u32 {
            let start0 = i64::from(start) - 1;
            let end0 = index.min(i64::from(extent) - 1).max(start0);
            u32::try_from(end0 - start0 + 1).unwrap_or(1).max(1)
        };
        (
            span(anchor.col, col, self.cols),
            span(anchor.row, row, self.rows),
        )
    }
}

/// An in-progress drag on an element's resize handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeDrag {
    element_id: ElementId,
    viewport: Viewport,
    anchor: Placement,
}

impl ResizeDrag {
    /// Start dragging. `None` when the element is not placed on `viewport`.
    #[must_use]
    pub fn begin(state: &LayoutState, element_id: &ElementId, viewport: Viewport) -> Option<Self> {
        let anchor = state.element(element_id)?.placement(viewport)?;
        Some(Self {
            element_id: element_id.clone(),
            viewport,
            anchor,
        })
    }

    /// Element being resized.
    #[must_use]
    pub fn element_id(&self) -> &ElementId {
        &self.element_id
    }

    /// Action for a pointer move to `(x, y)`.
    #[must_use]
    pub fn pointer_moved(&self, geometry: &GridGeometry, x: f32, y: f32) -> Action {
        let (col_span, row_span) = geometry.resize_spans(self.anchor, x, y);
        Action::ResizePlacement {
            element_id: self.element_id.clone(),
            viewport: self.viewport,
            col_span,
            row_span,
        }
    }
}
