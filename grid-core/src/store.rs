//! Layout store: the single owner of layout state.
//!
//! [`LayoutStore`] holds the current snapshot behind an [`Arc`]. Every
//! mutation goes through [`LayoutStore::dispatch`], which copies the
//! snapshot, applies one [`Action`] to the copy and commits the copy only if
//! the action succeeded. Observers holding an earlier snapshot keep seeing
//! it unchanged; nobody ever sees a half-applied action.
//!
//! # Example
//!
//! ```
//! use grid_core::{LayoutStore, Placement, Viewport};
//!
//! let mut store = LayoutStore::new();
//! let hero = store.add_element("Hero");
//! store.set_placement(&hero, Viewport::Desktop, Some(Placement::new(1, 1, 2, 1)));
//!
//! let json = store.export_json();
//! store.reset();
//! store.import_document(&json).unwrap();
//! assert_eq!(store.state().elements().len(), 1);
//! ```

use std::sync::Arc;

use crate::action::{Action, ActionOutcome};
use crate::element::ElementId;
use crate::error::LayoutResult;
use crate::placement::Placement;
use crate::report::render_report;
use crate::schema::LayoutDocument;
use crate::state::{DropSource, LayoutState};
use crate::viewport::{DesktopContainerWidth, TabletContainerWidth, Viewport};

/// Owner of the current layout snapshot.
#[derive(Debug, Clone, Default)]
pub struct LayoutStore {
    current: Arc<LayoutState>,
    revision: u64,
}

impl LayoutStore {
    /// Create a store holding the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `state`.
    #[must_use]
    pub fn with_state(state: LayoutState) -> Self {
        Self {
            current: Arc::new(state),
            revision: 0,
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &LayoutState {
        &self.current
    }

    /// A shared handle to the current snapshot. Later actions never modify it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<LayoutState> {
        Arc::clone(&self.current)
    }

    /// Number of committed state changes since the store was created.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply one action atomically.
    ///
    /// # Errors
    ///
    /// Returns the import error for a rejected [`Action::ImportDocument`];
    /// the state is left unchanged.
    pub fn dispatch(&mut self, action: Action) -> LayoutResult<ActionOutcome> {
        let name = action.name();
        let mut next = LayoutState::clone(&self.current);
        let created = match action.apply(&mut next) {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!("Rejected {name}: {e}");
                return Err(e);
            }
        };

        let changed = next != *self.current;
        if changed {
            self.current = Arc::new(next);
            self.revision += 1;
        }
        tracing::debug!(action = name, changed, revision = self.revision, "Dispatched action");

        Ok(ActionOutcome {
            changed,
            revision: self.revision,
            created,
        })
    }

    /// Dispatch an action that cannot fail.
    fn apply(&mut self, action: Action) {
        if let Err(e) = self.dispatch(action) {
            tracing::error!("Infallible action failed: {e}");
        }
    }

    // -----------------------------------------------------------------------
    // Action surface
    // -----------------------------------------------------------------------

    /// Switch the viewport being edited.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.apply(Action::SetViewport { viewport });
    }

    /// Set the desktop container width.
    pub fn set_desktop_container_width(&mut self, width: DesktopContainerWidth) {
        self.apply(Action::SetDesktopContainerWidth { width });
    }

    /// Set the tablet container width.
    pub fn set_tablet_container_width(&mut self, width: TabletContainerWidth) {
        self.apply(Action::SetTabletContainerWidth { width });
    }

    /// Resize the active viewport's column count.
    pub fn set_grid_cols(&mut self, cols: u32) {
        self.apply(Action::SetGridCols { cols });
    }

    /// Resize the active viewport's row count.
    pub fn set_grid_rows(&mut self, rows: u32) {
        self.apply(Action::SetGridRows { rows });
    }

    /// Append a row to the active viewport's grid.
    pub fn add_row(&mut self) {
        self.apply(Action::AddRow);
    }

    /// Delete the 1-based row `index` from the active viewport's grid.
    pub fn remove_row(&mut self, index: u32) {
        self.apply(Action::RemoveRow { index });
    }

    /// Append a column to the active viewport's grid.
    pub fn add_column(&mut self) {
        self.apply(Action::AddColumn);
    }

    /// Delete the 1-based column `index` from the active viewport's grid.
    pub fn remove_column(&mut self, index: u32) {
        self.apply(Action::RemoveColumn { index });
    }

    /// Create an unplaced element and return its id.
    ///
    /// The id is minted here and checked against the current registry, so
    /// the dispatched action always creates exactly this element.
    pub fn add_element(&mut self, description: impl Into<String>) -> ElementId {
        let mut id = ElementId::new();
        while self.current.elements().contains(&id) {
            id = ElementId::new();
        }
        self.apply(Action::AddElement {
            id: id.clone(),
            description: description.into(),
        });
        id
    }

    /// Delete an element. Unknown ids are ignored.
    pub fn remove_element(&mut self, id: &ElementId) {
        self.apply(Action::RemoveElement { id: id.clone() });
    }

    /// Replace an element's description with the trimmed text.
    pub fn update_element_description(&mut self, id: &ElementId, description: &str) {
        self.apply(Action::UpdateElementDescription {
            id: id.clone(),
            description: description.to_string(),
        });
    }

    /// Set (clamped to the grid) or clear an element's placement.
    pub fn set_placement(&mut self, id: &ElementId, viewport: Viewport, placement: Option<Placement>) {
        self.apply(Action::SetPlacement {
            element_id: id.clone(),
            viewport,
            placement,
        });
    }

    /// Move an element's existing placement.
    pub fn move_placement(&mut self, id: &ElementId, viewport: Viewport, col: u32, row: u32) {
        self.apply(Action::MovePlacement {
            element_id: id.clone(),
            viewport,
            col,
            row,
        });
    }

    /// Resize an element's existing placement.
    pub fn resize_placement(
        &mut self,
        id: &ElementId,
        viewport: Viewport,
        col_span: u32,
        row_span: u32,
    ) {
        self.apply(Action::ResizePlacement {
            element_id: id.clone(),
            viewport,
            col_span,
            row_span,
        });
    }

    /// Drop an element on a cell.
    pub fn drop_at(
        &mut self,
        id: &ElementId,
        viewport: Viewport,
        col: u32,
        row: u32,
        source: DropSource,
    ) {
        self.apply(Action::DropAt {
            element_id: id.clone(),
            viewport,
            col,
            row,
            source,
        });
    }

    /// Replace the whole layout with a JSON layout document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LayoutError::Parse`] or
    /// [`crate::LayoutError::Validation`]; the state is left unchanged.
    pub fn import_document(&mut self, json: &str) -> LayoutResult<()> {
        self.dispatch(Action::ImportDocument {
            json: json.to_string(),
        })?;
        tracing::info!(
            "Imported layout with {} element(s)",
            self.current.elements().len()
        );
        Ok(())
    }

    /// Restore the initial state.
    pub fn reset(&mut self) {
        self.apply(Action::Reset);
        tracing::info!("Layout reset");
    }

    /// Snapshot the current state as a layout document.
    #[must_use]
    pub fn export_document(&self) -> LayoutDocument {
        LayoutDocument::from_state(&self.current)
    }

    /// The current state as pretty-printed layout document JSON.
    #[must_use]
    pub fn export_json(&self) -> String {
        match self.export_document().to_json_pretty() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize layout: {e}");
                String::new()
            }
        }
    }

    /// The current state as a human-readable report.
    #[must_use]
    pub fn export_report(&self) -> String {
        render_report(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    #[test]
    fn dispatch_bumps_revision_only_on_change() {
        let mut store = LayoutStore::new();
        assert_eq!(store.revision(), 0);

        store.add_row();
        assert_eq!(store.revision(), 1);

        let outcome = store
            .dispatch(Action::SetViewport {
                viewport: Viewport::Desktop,
            })
            .expect("dispatch");
        assert!(!outcome.changed);
        assert_eq!(outcome.revision, 1);
    }

    #[test]
    fn add_element_returns_id_of_committed_element() {
        let mut store = LayoutStore::new();
        let first = store.add_element("Hero");
        let second = store.add_element("Nav");
        assert_ne!(first, second);
        assert_eq!(store.revision(), 2);

        let ids: Vec<_> = store.state().elements().iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn snapshots_are_immutable() {
        let mut store = LayoutStore::new();
        let before = store.snapshot();
        store.add_element("Hero");
        assert!(before.elements().is_empty());
        assert_eq!(store.state().elements().len(), 1);
    }

    #[test]
    fn grid_actions_follow_active_viewport() {
        let mut store = LayoutStore::new();
        store.set_viewport(Viewport::Mobile);
        store.set_grid_cols(3);
        store.add_row();
        assert_eq!(store.state().grid(Viewport::Mobile).cols, 3);
        assert_eq!(store.state().grid(Viewport::Mobile).rows, 3);
        assert_eq!(store.state().grid(Viewport::Desktop).cols, 6);
    }

    #[test]
    fn import_replaces_everything() {
        let mut source = LayoutStore::new();
        source.set_tablet_container_width(TabletContainerWidth::Half);
        let id = source.add_element("Sidebar");
        source.set_placement(&id, Viewport::Tablet, Some(Placement::new(1, 1, 1, 2)));
        let json = source.export_json();

        let mut target = LayoutStore::new();
        target.add_element("Old");
        target.set_grid_cols(12);
        target.import_document(&json).expect("import");

        assert_eq!(target.state(), source.state());
        assert_eq!(target.export_json(), json);
    }

    #[test]
    fn rejected_import_keeps_state_and_revision() {
        let mut store = LayoutStore::new();
        store.add_element("Keep me");
        let before = store.snapshot();
        let revision = store.revision();

        let err = store.import_document("{not json").expect_err("parse error");
        assert!(matches!(err, LayoutError::Parse(_)));

        let mut doc: serde_json::Value =
            serde_json::from_str(&store.export_json()).expect("json");
        doc["version"] = serde_json::json!(2);
        let err = store
            .import_document(&doc.to_string())
            .expect_err("validation error");
        assert!(matches!(err, LayoutError::Validation(_)));

        assert_eq!(*store.snapshot(), *before);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn import_keeps_active_viewport() {
        let json = LayoutStore::new().export_json();
        let mut store = LayoutStore::new();
        store.set_viewport(Viewport::Tablet);
        store.import_document(&json).expect("import");
        assert_eq!(store.state().viewport, Viewport::Tablet);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut store = LayoutStore::new();
        store.add_element("Hero");
        store.set_grid_rows(10);
        store.reset();
        assert_eq!(*store.state(), LayoutState::new());
        assert!(!store.state().has_content());
    }

    #[test]
    fn report_reflects_state() {
        let mut store = LayoutStore::new();
        let id = store.add_element("Hero");
        store.drop_at(&id, Viewport::Desktop, 2, 1, DropSource::Palette);
        assert!(store
            .export_report()
            .contains("- **Hero**: col 2, row 1, col-span 1, row-span 1"));
    }
}
