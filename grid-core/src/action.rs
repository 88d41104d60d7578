//! The action surface.
//!
//! Every mutation a UI can request is an [`Action`]. Actions are plain data
//! (serde-tagged, so a host can send them as JSON) and are applied by
//! [`crate::LayoutStore::dispatch`] as one atomic transition each.
//!
//! Grid actions target the active viewport; placement actions name their
//! viewport explicitly.

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::error::LayoutResult;
use crate::placement::Placement;
use crate::schema::LayoutDocument;
use crate::state::{DropSource, LayoutState};
use crate::viewport::{DesktopContainerWidth, TabletContainerWidth, Viewport};

/// A single state transition request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Switch the viewport being edited.
    SetViewport {
        /// Target viewport.
        viewport: Viewport,
    },
    /// Set the desktop container width.
    SetDesktopContainerWidth {
        /// New width.
        width: DesktopContainerWidth,
    },
    /// Set the tablet container width.
    SetTabletContainerWidth {
        /// New width.
        width: TabletContainerWidth,
    },
    /// Resize the active viewport's column count.
    SetGridCols {
        /// Requested column count; clamped to bounds.
        cols: u32,
    },
    /// Resize the active viewport's row count.
    SetGridRows {
        /// Requested row count; clamped to bounds.
        rows: u32,
    },
    /// Append a row to the active viewport's grid.
    AddRow,
    /// Delete a row from the active viewport's grid.
    RemoveRow {
        /// 1-based row index.
        index: u32,
    },
    /// Append a column to the active viewport's grid.
    AddColumn,
    /// Delete a column from the active viewport's grid.
    RemoveColumn {
        /// 1-based column index.
        index: u32,
    },
    /// Create an unplaced element.
    AddElement {
        /// Id for the new element; a fresh one when omitted. The action is
        /// a no-op if the id is already taken.
        #[serde(default)]
        id: ElementId,
        /// Element description.
        description: String,
    },
    /// Delete an element.
    RemoveElement {
        /// Element to delete.
        id: ElementId,
    },
    /// Replace an element's description with the trimmed text.
    UpdateElementDescription {
        /// Element to edit.
        id: ElementId,
        /// New description.
        description: String,
    },
    /// Set or clear a placement.
    SetPlacement {
        /// Element to place.
        element_id: ElementId,
        /// Viewport of the placement.
        viewport: Viewport,
        /// New placement, or `None` to clear.
        placement: Option<Placement>,
    },
    /// Move an existing placement's anchor.
    MovePlacement {
        /// Element to move.
        element_id: ElementId,
        /// Viewport of the placement.
        viewport: Viewport,
        /// Target column.
        col: u32,
        /// Target row.
        row: u32,
    },
    /// Change an existing placement's span.
    ResizePlacement {
        /// Element to resize.
        element_id: ElementId,
        /// Viewport of the placement.
        viewport: Viewport,
        /// Requested column span.
        col_span: u32,
        /// Requested row span.
        row_span: u32,
    },
    /// Drop an element on a cell: a grid block moves, a palette item
    /// becomes a 1×1 block.
    DropAt {
        /// Element being dropped.
        element_id: ElementId,
        /// Viewport of the grid.
        viewport: Viewport,
        /// Target column.
        col: u32,
        /// Target row.
        row: u32,
        /// Where the drag started.
        #[serde(default)]
        source: DropSource,
    },
    /// Replace the whole layout with a JSON layout document.
    ImportDocument {
        /// Document text.
        json: String,
    },
    /// Restore the initial state.
    Reset,
}

impl Action {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetViewport { .. } => "setViewport",
            Self::SetDesktopContainerWidth { .. } => "setDesktopContainerWidth",
            Self::SetTabletContainerWidth { .. } => "setTabletContainerWidth",
            Self::SetGridCols { .. } => "setGridCols",
            Self::SetGridRows { .. } => "setGridRows",
            Self::AddRow => "addRow",
            Self::RemoveRow { .. } => "removeRow",
            Self::AddColumn => "addColumn",
            Self::RemoveColumn { .. } => "removeColumn",
            Self::AddElement { .. } => "addElement",
            Self::RemoveElement { .. } => "removeElement",
            Self::UpdateElementDescription { .. } => "updateElementDescription",
            Self::SetPlacement { .. } => "setPlacement",
            Self::MovePlacement { .. } => "movePlacement",
            Self::ResizePlacement { .. } => "resizePlacement",
            Self::DropAt { .. } => "dropAt",
            Self::ImportDocument { .. } => "importDocument",
            Self::Reset => "reset",
        }
    }

    /// Apply this action to `state`.
    ///
    /// Returns the id of a newly created element, if any.
    ///
    /// # Errors
    ///
    /// Only [`Action::ImportDocument`] can fail; `state` is untouched when it does.
    pub fn apply(self, state: &mut LayoutState) -> LayoutResult<Option<ElementId>> {
        let active = state.viewport;
        match self {
            Self::SetViewport { viewport } => state.set_viewport(viewport),
            Self::SetDesktopContainerWidth { width } => state.set_desktop_container_width(width),
            Self::SetTabletContainerWidth { width } => state.set_tablet_container_width(width),
            Self::SetGridCols { cols } => state.set_cols(active, cols),
            Self::SetGridRows { rows } => state.set_rows(active, rows),
            Self::AddRow => state.add_row(active),
            Self::RemoveRow { index } => state.remove_row(active, index),
            Self::AddColumn => state.add_column(active),
            Self::RemoveColumn { index } => state.remove_column(active, index),
            Self::AddElement { id, description } => {
                return Ok(state.add_element_with_id(id, description));
            }
            Self::RemoveElement { id } => state.remove_element(&id),
            Self::UpdateElementDescription { id, description } => {
                state.update_element_description(&id, &description);
            }
            Self::SetPlacement {
                element_id,
                viewport,
                placement,
            } => state.set_placement(&element_id, viewport, placement),
            Self::MovePlacement {
                element_id,
                viewport,
                col,
                row,
            } => state.move_placement(&element_id, viewport, col, row),
            Self::ResizePlacement {
                element_id,
                viewport,
                col_span,
                row_span,
            } => state.resize_placement(&element_id, viewport, col_span, row_span),
            Self::DropAt {
                element_id,
                viewport,
                col,
                row,
                source,
            } => state.drop_at(&element_id, viewport, col, row, source),
            Self::ImportDocument { json } => {
                let document = LayoutDocument::parse(&json)?;
                *state = document.into_state(active)?;
            }
            Self::Reset => *state = LayoutState::new(),
        }
        Ok(None)
    }
}

/// What a dispatched action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Whether the state changed.
    pub changed: bool,
    /// Store revision after the action.
    pub revision: u64,
    /// Id of the element created by [`Action::AddElement`].
    pub created: Option<ElementId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_actions_target_active_viewport() {
        let mut state = LayoutState::new();
        Action::SetViewport {
            viewport: Viewport::Tablet,
        }
        .apply(&mut state)
        .expect("apply");
        Action::SetGridCols { cols: 10 }
            .apply(&mut state)
            .expect("apply");

        assert_eq!(state.grid(Viewport::Tablet).cols, 10);
        assert_eq!(state.grid(Viewport::Desktop).cols, 6);
    }

    #[test]
    fn add_element_reports_created_id() {
        let mut state = LayoutState::new();
        let id = ElementId::new();
        let created = Action::AddElement {
            id: id.clone(),
            description: "Hero".to_string(),
        }
        .apply(&mut state)
        .expect("apply")
        .expect("created id");
        assert_eq!(created, id);
        assert!(state.element(&created).is_some());

        let duplicate = Action::AddElement {
            id,
            description: "Again".to_string(),
        }
        .apply(&mut state)
        .expect("apply");
        assert_eq!(duplicate, None);
        assert_eq!(state.elements().len(), 1);
    }

    #[test]
    fn optional_fields_default_when_omitted() {
        let action: Action =
            serde_json::from_str(r#"{"type":"addElement","description":"Hero"}"#)
                .expect("deserialize");
        match action {
            Action::AddElement { id, description } => {
                assert!(id.as_str().starts_with("el-"));
                assert_eq!(description, "Hero");
            }
            other => panic!("Expected addElement, got {other:?}"),
        }

        let action: Action = serde_json::from_str(
            r#"{"type":"dropAt","elementId":"el-1","viewport":"desktop","col":2,"row":1}"#,
        )
        .expect("deserialize");
        assert!(matches!(
            action,
            Action::DropAt {
                source: DropSource::Palette,
                ..
            }
        ));

        let action: Action = serde_json::from_str(
            r#"{"type":"dropAt","elementId":"el-1","viewport":"desktop","col":2,"row":1,"source":"grid"}"#,
        )
        .expect("deserialize");
        assert!(matches!(
            action,
            Action::DropAt {
                source: DropSource::Grid,
                ..
            }
        ));
    }

    #[test]
    fn failed_import_leaves_state_untouched() {
        let mut state = LayoutState::new();
        state.add_element("Keep me");
        let before = state.clone();

        let result = Action::ImportDocument {
            json: "{not json".to_string(),
        }
        .apply(&mut state);
        assert!(result.is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let action: Action = serde_json::from_str(
            r#"{"type":"resizePlacement","elementId":"el-1","viewport":"tablet","colSpan":2,"rowSpan":3}"#,
        )
        .expect("deserialize");
        assert_eq!(
            action,
            Action::ResizePlacement {
                element_id: ElementId::from("el-1"),
                viewport: Viewport::Tablet,
                col_span: 2,
                row_span: 3,
            }
        );

        let action: Action = serde_json::from_str(r#"{"type":"addRow"}"#).expect("deserialize");
        assert_eq!(action.name(), "addRow");

        let action: Action = serde_json::from_str(
            r#"{"type":"setPlacement","elementId":"el-1","viewport":"mobile","placement":null}"#,
        )
        .expect("deserialize");
        assert!(matches!(action, Action::SetPlacement { placement: None, .. }));
    }

    #[test]
    fn invalid_container_width_action_is_rejected_by_serde() {
        let result: Result<Action, _> =
            serde_json::from_str(r#"{"type":"setDesktopContainerWidth","width":5}"#);
        assert!(result.is_err());
    }
}
