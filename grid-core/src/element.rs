//! Layout elements - the placeable units of a layout.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::placement::Placement;
use crate::viewport::{Viewport, ViewportMap};

/// Prefix of generated element ids.
const ID_PREFIX: &str = "el-";

/// Unique, stable identifier for an element.
///
/// Generated ids are `el-` followed by a v4 UUID; ids read from a layout
/// document are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(format!("{ID_PREFIX}{}", Uuid::new_v4().simple()))
    }

    /// The id as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional placement per viewport. `None` means unplaced on that viewport.
pub type Placements = ViewportMap<Option<Placement>>;

/// A named element with an independent placement per viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// What the element represents ("Hero", "Sidebar", ...).
    pub description: String,
    /// Placement on each viewport.
    pub placements: Placements,
}

impl Element {
    /// Create an unplaced element with a fresh id.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            description: description.into(),
            placements: Placements::default(),
        }
    }

    /// Replace the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Placement on a viewport, if any.
    #[must_use]
    pub fn placement(&self, viewport: Viewport) -> Option<Placement> {
        self.placements[viewport]
    }

    /// Whether the element is placed on a viewport.
    #[must_use]
    pub fn is_placed(&self, viewport: Viewport) -> bool {
        self.placements[viewport].is_some()
    }
}
