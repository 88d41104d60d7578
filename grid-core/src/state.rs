//! Layout state and its transitions.
//!
//! [`LayoutState`] is one complete snapshot: the active viewport, container
//! widths, a grid per viewport and the element registry. Every method is a
//! total, synchronous transition that re-establishes the placement
//! invariants before returning:
//!
//! - every grid stays within the global bounds;
//! - every stored placement fits its viewport's current grid;
//! - a grid or placement change on one viewport never touches another.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};
use crate::grid::{default_grid, GridDimensions, GridPerViewport};
use crate::placement::{
    adjust_after_remove_column, adjust_after_remove_row, clamp_placement, move_to, resize_to,
    Placement,
};
use crate::registry::ElementRegistry;
use crate::viewport::{DesktopContainerWidth, TabletContainerWidth, Viewport, ViewportConfig};

/// Where a dropped element was dragged from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropSource {
    /// The element list beside the grid.
    #[default]
    Palette,
    /// A block already on this viewport's grid.
    Grid,
}

/// The complete layout state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    /// Viewport currently being edited.
    pub viewport: Viewport,
    /// Container widths.
    pub viewport_config: ViewportConfig,
    grid: GridPerViewport,
    elements: ElementRegistry,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutState {
    /// Create the initial state: desktop active, default grids, no elements.
    #[must_use]
    pub fn new() -> Self {
        Self {
            viewport: Viewport::Desktop,
            viewport_config: ViewportConfig::default(),
            grid: default_grid(),
            elements: ElementRegistry::new(),
        }
    }

    /// Assemble a state from parts that already satisfy the invariants.
    pub(crate) fn from_parts(
        viewport: Viewport,
        viewport_config: ViewportConfig,
        grid: GridPerViewport,
        elements: ElementRegistry,
    ) -> Self {
        Self {
            viewport,
            viewport_config,
            grid,
            elements,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Grid dimensions of a viewport.
    #[must_use]
    pub fn grid(&self, viewport: Viewport) -> GridDimensions {
        self.grid[viewport]
    }

    /// Grid dimensions of every viewport.
    #[must_use]
    pub fn grids(&self) -> &GridPerViewport {
        &self.grid
    }

    /// The element registry.
    #[must_use]
    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    /// Get an element by id.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Whether this state holds anything an import would destroy: any
    /// element, or any grid that differs from its initial size.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.elements.is_empty()
            || self
                .grid
                .iter()
                .any(|(vp, g)| *g != GridDimensions::default_for(vp))
    }

    /// Describe every invariant violation. Empty for every reachable state.
    #[must_use]
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for (vp, g) in self.grid.iter() {
            if !g.is_within_bounds() {
                violations.push(format!("{vp} grid {}x{} out of bounds", g.cols, g.rows));
            }
        }
        for vp in Viewport::ALL {
            let g = self.grid[vp];
            for (element, p) in self.elements.placed_on(vp) {
                if !g.contains(&p) {
                    violations.push(format!(
                        "{} {vp} placement {p:?} does not fit {}x{}",
                        element.id, g.cols, g.rows
                    ));
                }
            }
        }
        let mut ids: Vec<_> = self.elements.iter().map(|e| &e.id).collect();
        ids.sort();
        for pair in ids.windows(2) {
            if pair[0] == pair[1] {
                violations.push(format!("duplicate element id {}", pair[0]));
            }
        }
        violations
    }

    // -----------------------------------------------------------------------
    // Viewport configuration
    // -----------------------------------------------------------------------

    /// Switch the viewport being edited.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Set the desktop container width.
    pub fn set_desktop_container_width(&mut self, width: DesktopContainerWidth) {
        self.viewport_config.desktop = width;
    }

    /// Set the tablet container width.
    pub fn set_tablet_container_width(&mut self, width: TabletContainerWidth) {
        self.viewport_config.tablet = width;
    }

    // -----------------------------------------------------------------------
    // Grid dimensions
    // -----------------------------------------------------------------------

    /// Resize a viewport's column count (clamped to bounds), then clamp
    /// every placement on that viewport to the new grid.
    pub fn set_cols(&mut self, viewport: Viewport, cols: u32) {
        let next = self.grid[viewport].with_cols(cols);
        self.resize_grid(viewport, next);
    }

    /// Resize a viewport's row count (clamped to bounds), then clamp every
    /// placement on that viewport to the new grid.
    pub fn set_rows(&mut self, viewport: Viewport, rows: u32) {
        let next = self.grid[viewport].with_rows(rows);
        self.resize_grid(viewport, next);
    }

    fn resize_grid(&mut self, viewport: Viewport, next: GridDimensions) {
        self.grid[viewport] = next;
        let cleared = self
            .elements
            .repair_placements(viewport, |p| clamp_placement(p, next.cols, next.rows));
        if cleared > 0 {
            tracing::debug!(
                "Resizing {viewport} grid to {}x{} cleared {cleared} placement(s)",
                next.cols,
                next.rows
            );
        }
    }

    /// Append a row to a viewport's grid, up to the maximum.
    pub fn add_row(&mut self, viewport: Viewport) {
        self.grid[viewport] = self.grid[viewport].with_added_row();
    }

    /// Append a column to a viewport's grid, up to the maximum.
    pub fn add_column(&mut self, viewport: Viewport) {
        self.grid[viewport] = self.grid[viewport].with_added_column();
    }

    /// Delete the 1-based row `index` from a viewport's grid and shift or
    /// shrink the placements around it. No-op at the minimum row count.
    ///
    /// `index` is clamped into the current row range.
    pub fn remove_row(&mut self, viewport: Viewport, index: u32) {
        let current = self.grid[viewport];
        let Some(next) = current.without_row() else {
            return;
        };
        let removed = index.clamp(1, current.rows);
        self.grid[viewport] = next;
        self.elements
            .repair_placements(viewport, |p| adjust_after_remove_row(p, removed, next.rows));
    }

    /// Delete the 1-based column `index` from a viewport's grid and shift or
    /// shrink the placements around it. No-op at the minimum column count.
    ///
    /// `index` is clamped into the current column range.
    pub fn remove_column(&mut self, viewport: Viewport, index: u32) {
        let current = self.grid[viewport];
        let Some(next) = current.without_column() else {
            return;
        };
        let removed = index.clamp(1, current.cols);
        self.grid[viewport] = next;
        self.elements.repair_placements(viewport, |p| {
            adjust_after_remove_column(p, removed, next.cols)
        });
    }

    // -----------------------------------------------------------------------
    // Elements
    // -----------------------------------------------------------------------

    /// Add an unplaced element and return its fresh id.
    pub fn add_element(&mut self, description: impl Into<String>) -> ElementId {
        self.elements.add(description)
    }

    /// Add an unplaced element under a caller-chosen id.
    ///
    /// Returns `None` and changes nothing when the id is already taken.
    pub fn add_element_with_id(
        &mut self,
        id: ElementId,
        description: impl Into<String>,
    ) -> Option<ElementId> {
        let element = Element::new(description).with_id(id);
        let id = element.id.clone();
        match self.elements.insert(element) {
            Ok(()) => Some(id),
            Err(rejected) => {
                tracing::warn!("Element id {} is already taken", rejected.id);
                None
            }
        }
    }

    /// Remove an element. Unknown ids are ignored.
    pub fn remove_element(&mut self, id: &ElementId) {
        self.elements.remove(id);
    }

    /// Store the trimmed description of an element. Unknown ids are ignored.
    pub fn update_element_description(&mut self, id: &ElementId, description: &str) {
        self.elements.update_description(id, description);
    }

    /// Set or clear an element's placement on a viewport.
    ///
    /// A placement is clamped to the viewport's grid first; one that cannot
    /// be clamped clears the slot instead.
    pub fn set_placement(&mut self, id: &ElementId, viewport: Viewport, placement: Option<Placement>) {
        let g = self.grid[viewport];
        let normalized = placement.and_then(|p| clamp_placement(p, g.cols, g.rows));
        if let Some(element) = self.elements.get_mut(id) {
            element.placements[viewport] = normalized;
        }
    }

    /// Move an element's existing placement to a new anchor. Does nothing
    /// when the element is unplaced on that viewport or the target is
    /// outside the grid.
    pub fn move_placement(&mut self, id: &ElementId, viewport: Viewport, col: u32, row: u32) {
        let g = self.grid[viewport];
        self.update_placement(id, viewport, |p| move_to(p, col, row, g.cols, g.rows));
    }

    /// Change the span of an element's existing placement, anchor fixed.
    /// Does nothing when the element is unplaced on that viewport.
    pub fn resize_placement(
        &mut self,
        id: &ElementId,
        viewport: Viewport,
        col_span: u32,
        row_span: u32,
    ) {
        let g = self.grid[viewport];
        self.update_placement(id, viewport, |p| {
            resize_to(p, col_span, row_span, g.cols, g.rows)
        });
    }

    /// Drop an element onto a cell.
    ///
    /// A block dragged within the grid moves and keeps its span. An element
    /// dragged in from the palette becomes a 1×1 block at the cell, replacing
    /// any placement it already had on the viewport.
    pub fn drop_at(
        &mut self,
        id: &ElementId,
        viewport: Viewport,
        col: u32,
        row: u32,
        source: DropSource,
    ) {
        match source {
            DropSource::Grid => self.move_placement(id, viewport, col, row),
            DropSource::Palette => {
                self.set_placement(id, viewport, Some(Placement::cell(col, row)));
            }
        }
    }

    fn update_placement(
        &mut self,
        id: &ElementId,
        viewport: Viewport,
        f: impl FnOnce(Placement) -> Placement,
    ) {
        if let Some(element) = self.elements.get_mut(id) {
            let slot = &mut element.placements[viewport];
            if let Some(current) = *slot {
                *slot = Some(f(current));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_grid(cols: u32, rows: u32) -> LayoutState {
        let mut state = LayoutState::new();
        state.set_cols(Viewport::Desktop, cols);
        state.set_rows(Viewport::Desktop, rows);
        state
    }

    fn placed(state: &mut LayoutState, placement: Placement) -> ElementId {
        let id = state.add_element("Block");
        state.set_placement(&id, Viewport::Desktop, Some(placement));
        id
    }

    fn desktop(state: &LayoutState, id: &ElementId) -> Option<Placement> {
        state.element(id).and_then(|e| e.placement(Viewport::Desktop))
    }

    #[test]
    fn initial_state() {
        let state = LayoutState::new();
        assert_eq!(state.viewport, Viewport::Desktop);
        assert_eq!(state.grid(Viewport::Desktop), GridDimensions::new(6, 2));
        assert!(state.elements().is_empty());
        assert!(!state.has_content());
        assert!(state.invariant_violations().is_empty());
    }

    #[test]
    fn set_cols_clamps_to_bounds() {
        let mut state = LayoutState::new();
        state.set_cols(Viewport::Tablet, 99);
        assert_eq!(state.grid(Viewport::Tablet).cols, 24);
        state.set_cols(Viewport::Tablet, 0);
        assert_eq!(state.grid(Viewport::Tablet).cols, 1);
        assert_eq!(state.grid(Viewport::Desktop).cols, 6);
    }

    #[test]
    fn shrinking_cols_clamps_then_clears() {
        let mut state = state_with_grid(6, 3);
        let id = placed(&mut state, Placement::new(3, 1, 4, 1));

        state.set_cols(Viewport::Desktop, 4);
        assert_eq!(desktop(&state, &id), Some(Placement::new(3, 1, 2, 1)));

        state.set_cols(Viewport::Desktop, 2);
        assert_eq!(desktop(&state, &id), None);
    }

    #[test]
    fn remove_row_shifts_following_placement() {
        let mut state = state_with_grid(6, 3);
        let id = placed(&mut state, Placement::new(1, 2, 1, 1));

        state.remove_row(Viewport::Desktop, 1);
        assert_eq!(state.grid(Viewport::Desktop).rows, 2);
        assert_eq!(desktop(&state, &id), Some(Placement::new(1, 1, 1, 1)));
    }

    #[test]
    fn remove_row_collapses_span() {
        let mut state = state_with_grid(6, 3);
        let id = placed(&mut state, Placement::new(1, 2, 1, 2));

        state.remove_row(Viewport::Desktop, 2);
        assert_eq!(desktop(&state, &id), Some(Placement::new(1, 2, 1, 1)));
    }

    #[test]
    fn remove_row_at_minimum_is_noop() {
        let mut state = state_with_grid(6, 1);
        let id = placed(&mut state, Placement::cell(1, 1));
        let before = state.clone();

        state.remove_row(Viewport::Desktop, 1);
        assert_eq!(state, before);
        assert!(desktop(&state, &id).is_some());
    }

    #[test]
    fn remove_column_index_is_clamped() {
        let mut state = state_with_grid(3, 2);
        let id = placed(&mut state, Placement::new(3, 1, 1, 1));

        // Past the end behaves like removing the last column.
        state.remove_column(Viewport::Desktop, 10);
        assert_eq!(state.grid(Viewport::Desktop).cols, 2);
        assert_eq!(desktop(&state, &id), None);
    }

    #[test]
    fn add_row_never_touches_placements() {
        let mut state = state_with_grid(6, 2);
        let id = placed(&mut state, Placement::new(2, 1, 2, 2));
        state.add_row(Viewport::Desktop);
        state.add_column(Viewport::Desktop);
        assert_eq!(state.grid(Viewport::Desktop), GridDimensions::new(7, 3));
        assert_eq!(desktop(&state, &id), Some(Placement::new(2, 1, 2, 2)));
    }

    #[test]
    fn viewports_are_independent() {
        let mut state = LayoutState::new();
        let id = state.add_element("Hero");
        state.set_placement(&id, Viewport::Desktop, Some(Placement::new(1, 1, 6, 2)));
        state.set_placement(&id, Viewport::Tablet, Some(Placement::new(1, 1, 4, 2)));

        state.set_cols(Viewport::Desktop, 1);
        state.remove_row(Viewport::Desktop, 1);

        let element = state.element(&id).expect("exists");
        assert_eq!(element.placement(Viewport::Desktop), Some(Placement::new(1, 1, 1, 1)));
        assert_eq!(element.placement(Viewport::Tablet), Some(Placement::new(1, 1, 4, 2)));
        assert_eq!(state.grid(Viewport::Tablet), GridDimensions::new(4, 2));
    }

    #[test]
    fn set_placement_normalizes_or_clears() {
        let mut state = state_with_grid(6, 3);
        let id = placed(&mut state, Placement::new(5, 1, 5, 9));
        assert_eq!(desktop(&state, &id), Some(Placement::new(5, 1, 2, 3)));

        state.set_placement(&id, Viewport::Desktop, Some(Placement::cell(7, 1)));
        assert_eq!(desktop(&state, &id), None);

        state.set_placement(&id, Viewport::Desktop, Some(Placement::cell(1, 1)));
        state.set_placement(&id, Viewport::Desktop, None);
        assert_eq!(desktop(&state, &id), None);
    }

    #[test]
    fn move_is_noop_when_unplaced() {
        let mut state = LayoutState::new();
        let id = state.add_element("Hero");
        let before = state.clone();
        state.move_placement(&id, Viewport::Desktop, 2, 2);
        assert_eq!(state, before);
    }

    #[test]
    fn move_and_resize() {
        let mut state = state_with_grid(6, 3);
        let id = placed(&mut state, Placement::new(1, 1, 3, 1));

        state.move_placement(&id, Viewport::Desktop, 5, 2);
        assert_eq!(desktop(&state, &id), Some(Placement::new(5, 2, 2, 1)));

        state.move_placement(&id, Viewport::Desktop, 9, 1);
        assert_eq!(desktop(&state, &id), Some(Placement::new(5, 2, 2, 1)));

        state.resize_placement(&id, Viewport::Desktop, 1, 5);
        assert_eq!(desktop(&state, &id), Some(Placement::new(5, 2, 1, 2)));
    }

    #[test]
    fn resize_is_noop_when_unplaced() {
        let mut state = LayoutState::new();
        let id = state.add_element("Hero");
        state.resize_placement(&id, Viewport::Mobile, 2, 2);
        assert!(!state.element(&id).expect("exists").is_placed(Viewport::Mobile));
    }

    #[test]
    fn palette_drop_places_one_by_one() {
        let mut state = state_with_grid(6, 3);
        let id = state.add_element("Card");

        state.drop_at(&id, Viewport::Desktop, 2, 2, DropSource::Palette);
        assert_eq!(desktop(&state, &id), Some(Placement::cell(2, 2)));
    }

    #[test]
    fn palette_drop_resets_existing_span() {
        let mut state = state_with_grid(6, 2);
        let id = placed(&mut state, Placement::new(1, 1, 3, 2));

        state.drop_at(&id, Viewport::Desktop, 4, 1, DropSource::Palette);
        assert_eq!(desktop(&state, &id), Some(Placement::cell(4, 1)));
    }

    #[test]
    fn grid_drop_moves_and_keeps_span() {
        let mut state = state_with_grid(6, 3);
        let id = placed(&mut state, Placement::new(2, 2, 2, 2));

        state.drop_at(&id, Viewport::Desktop, 1, 1, DropSource::Grid);
        assert_eq!(desktop(&state, &id), Some(Placement::new(1, 1, 2, 2)));
    }

    #[test]
    fn grid_drop_of_unplaced_element_is_noop() {
        let mut state = state_with_grid(6, 3);
        let id = state.add_element("Card");

        state.drop_at(&id, Viewport::Desktop, 1, 1, DropSource::Grid);
        assert_eq!(desktop(&state, &id), None);
    }

    #[test]
    fn add_element_with_taken_id_changes_nothing() {
        let mut state = LayoutState::new();
        let id = state
            .add_element_with_id(ElementId::from("hero"), "Hero")
            .expect("free id");
        assert_eq!(id.as_str(), "hero");

        let before = state.clone();
        assert_eq!(state.add_element_with_id(ElementId::from("hero"), "Other"), None);
        assert_eq!(state, before);
    }

    #[test]
    fn remove_row_index_is_clamped_into_range() {
        // Index 0 acts on row 1: the block below shifts up.
        let mut state = state_with_grid(6, 3);
        let id = placed(&mut state, Placement::new(1, 2, 1, 2));
        state.remove_row(Viewport::Desktop, 0);
        assert_eq!(state.grid(Viewport::Desktop).rows, 2);
        assert_eq!(desktop(&state, &id), Some(Placement::new(1, 1, 1, 2)));

        // An index past the end acts on the last row: the block loses it.
        let mut state = state_with_grid(6, 3);
        let id = placed(&mut state, Placement::new(1, 2, 1, 2));
        state.remove_row(Viewport::Desktop, 10);
        assert_eq!(state.grid(Viewport::Desktop).rows, 2);
        assert_eq!(desktop(&state, &id), Some(Placement::new(1, 2, 1, 1)));
    }

    #[test]
    fn remove_column_index_is_clamped_into_range() {
        let mut state = state_with_grid(6, 2);
        let id = placed(&mut state, Placement::new(3, 1, 2, 1));
        state.remove_column(Viewport::Desktop, 0);
        assert_eq!(state.grid(Viewport::Desktop).cols, 5);
        assert_eq!(desktop(&state, &id), Some(Placement::new(2, 1, 2, 1)));

        state.remove_column(Viewport::Desktop, 99);
        assert_eq!(state.grid(Viewport::Desktop).cols, 4);
        assert_eq!(desktop(&state, &id), Some(Placement::new(2, 1, 2, 1)));
    }

    #[test]
    fn overlapping_placements_are_allowed() {
        let mut state = LayoutState::new();
        let a = placed(&mut state, Placement::new(1, 1, 2, 2));
        let b = placed(&mut state, Placement::new(1, 1, 2, 2));
        assert_eq!(desktop(&state, &a), desktop(&state, &b));
        assert!(state.invariant_violations().is_empty());
    }

    #[test]
    fn has_content_tracks_grid_and_elements() {
        let mut state = LayoutState::new();
        state.add_row(Viewport::Mobile);
        assert!(state.has_content());

        let mut state = LayoutState::new();
        state.add_element("Hero");
        assert!(state.has_content());

        let mut state = LayoutState::new();
        state.set_desktop_container_width(DesktopContainerWidth::Half);
        state.set_viewport(Viewport::Tablet);
        assert!(!state.has_content());
    }
}
