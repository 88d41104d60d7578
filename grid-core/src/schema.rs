//! Canonical layout document: the portable export/import unit.
//!
//! ```json
//! {
//!   "version": 1,
//!   "viewportConfig": {
//!     "desktop": { "containerWidth": 12 },
//!     "tablet": { "containerWidth": 8 }
//!   },
//!   "grid": {
//!     "desktop": { "cols": 6, "rows": 2 },
//!     "tablet": { "cols": 4, "rows": 2 },
//!     "mobile": { "cols": 1, "rows": 2 }
//!   },
//!   "elements": [
//!     {
//!       "id": "el-1",
//!       "description": "Hero",
//!       "placements": { "desktop": { "col": 1, "row": 1, "colSpan": 2, "rowSpan": 1 } }
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId, Placements};
use crate::error::{LayoutResult, ValidationError};
use crate::grid::GridPerViewport;
use crate::placement::Placement;
use crate::registry::ElementRegistry;
use crate::state::LayoutState;
use crate::validate::validate_document;
use crate::viewport::{
    DesktopContainerWidth, TabletContainerWidth, Viewport, ViewportConfig,
};

/// The only document version this crate reads and writes.
pub const DOCUMENT_VERSION: u32 = 1;

/// Container width wrapper, `{ "containerWidth": n }` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDocument<W> {
    /// Width in page columns.
    pub container_width: W,
}

/// Container widths of the viewports that have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfigDocument {
    /// Desktop container.
    pub desktop: ContainerDocument<DesktopContainerWidth>,
    /// Tablet container.
    pub tablet: ContainerDocument<TabletContainerWidth>,
}

impl From<ViewportConfig> for ViewportConfigDocument {
    fn from(config: ViewportConfig) -> Self {
        Self {
            desktop: ContainerDocument {
                container_width: config.desktop,
            },
            tablet: ContainerDocument {
                container_width: config.tablet,
            },
        }
    }
}

impl From<ViewportConfigDocument> for ViewportConfig {
    fn from(doc: ViewportConfigDocument) -> Self {
        Self {
            desktop: doc.desktop.container_width,
            tablet: doc.tablet.container_width,
        }
    }
}

/// Placements keyed by viewport; unplaced viewports are omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlacementsDocument {
    /// Desktop placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<Placement>,
    /// Tablet placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet: Option<Placement>,
    /// Mobile placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Placement>,
}

impl From<Placements> for PlacementsDocument {
    fn from(p: Placements) -> Self {
        Self {
            desktop: p.desktop,
            tablet: p.tablet,
            mobile: p.mobile,
        }
    }
}

impl From<PlacementsDocument> for Placements {
    fn from(doc: PlacementsDocument) -> Self {
        Self::new(doc.desktop, doc.tablet, doc.mobile)
    }
}

/// Document-friendly element description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDocument {
    /// Element identifier.
    pub id: String,
    /// Element description.
    pub description: String,
    /// Placement per viewport.
    pub placements: PlacementsDocument,
}

impl From<&Element> for ElementDocument {
    fn from(element: &Element) -> Self {
        Self {
            id: element.id.to_string(),
            description: element.description.clone(),
            placements: element.placements.into(),
        }
    }
}

impl ElementDocument {
    /// Convert document to runtime element.
    #[must_use]
    pub fn into_element(self) -> Element {
        Element {
            id: ElementId::from(self.id),
            description: self.description,
            placements: self.placements.into(),
        }
    }
}

/// Canonical layout document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    /// Format version, always [`DOCUMENT_VERSION`].
    pub version: u32,
    /// Container widths.
    pub viewport_config: ViewportConfigDocument,
    /// Grid dimensions per viewport.
    pub grid: GridPerViewport,
    /// Elements in order.
    pub elements: Vec<ElementDocument>,
}

impl LayoutDocument {
    /// Build a document from a runtime state.
    #[must_use]
    pub fn from_state(state: &LayoutState) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            viewport_config: state.viewport_config.into(),
            grid: *state.grids(),
            elements: state.elements().iter().map(ElementDocument::from).collect(),
        }
    }

    /// Parse and validate document text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LayoutError::Parse`] for malformed JSON and
    /// [`crate::LayoutError::Validation`] for a schema violation.
    pub fn parse(text: &str) -> LayoutResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(validate_document(&value)?)
    }

    /// Serialize as pretty-printed JSON (2-space indent).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Materialize a state, replacing everything. The active viewport is
    /// not part of the document and is passed in.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the version is wrong, a grid is out
    /// of bounds, an element id repeats, or a placement does not fit its
    /// viewport's grid.
    pub fn into_state(self, viewport: Viewport) -> Result<LayoutState, ValidationError> {
        if self.version != DOCUMENT_VERSION {
            return Err(ValidationError::new(
                "version",
                format!("must equal {DOCUMENT_VERSION} (got {})", self.version),
            ));
        }
        for (vp, g) in self.grid.iter() {
            if !g.is_within_bounds() {
                return Err(ValidationError::new(
                    format!("grid.{vp}"),
                    format!("{}x{} is outside the allowed grid bounds", g.cols, g.rows),
                ));
            }
        }

        let mut registry = ElementRegistry::new();
        for (index, doc) in self.elements.into_iter().enumerate() {
            let element = doc.into_element();
            for (vp, placement) in element.placements.iter() {
                let g = self.grid[vp];
                if let Some(p) = placement {
                    if !g.contains(p) {
                        return Err(ValidationError::new(
                            format!("elements[{index}].placements.{vp}"),
                            format!(
                                "placement at col {}, row {} spanning {}x{} does not fit the {}x{} grid",
                                p.col, p.row, p.col_span, p.row_span, g.cols, g.rows
                            ),
                        ));
                    }
                }
            }
            registry.insert(element).map_err(|dup| {
                ValidationError::new(
                    format!("elements[{index}].id"),
                    format!("duplicate element id \"{}\"", dup.id),
                )
            })?;
        }

        Ok(LayoutState::from_parts(
            viewport,
            self.viewport_config.into(),
            self.grid,
            registry,
        ))
    }
}
