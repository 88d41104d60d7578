//! # Gridmaker Core
//!
//! Layout engine for composing a page as elements placed on a grid,
//! independently for desktop, tablet and mobile.
//! Compiles to WASM so a browser UI can drive it directly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 grid-core                   │
//! ├─────────────────────────────────────────────┤
//! │  LayoutStore     │  Codec                   │
//! │  - Actions       │  - LayoutDocument (JSON) │
//! │  - Snapshots     │  - Validator             │
//! │  - Revisions     │  - Markdown report       │
//! ├─────────────────────────────────────────────┤
//! │  LayoutState     │  Placement algebra       │
//! │  - Grid / vp     │  - Clamp                 │
//! │  - Elements      │  - Row/col removal       │
//! │  - Viewports     │  - Move / resize         │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod element;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod placement;
pub mod registry;
pub mod report;
pub mod schema;
pub mod state;
pub mod store;
pub mod validate;
pub mod viewport;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use action::{Action, ActionOutcome};
pub use element::{Element, ElementId, Placements};
pub use error::{LayoutError, LayoutResult, ValidationError};
pub use geometry::{GridGeometry, ResizeDrag};
pub use grid::{GridDimensions, GridPerViewport, MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};
pub use placement::{
    adjust_after_remove_column, adjust_after_remove_row, clamp_placement, move_to, resize_to,
    Placement,
};
pub use registry::ElementRegistry;
pub use report::render_report;
pub use schema::{ElementDocument, LayoutDocument, DOCUMENT_VERSION};
pub use state::{DropSource, LayoutState};
pub use store::LayoutStore;
pub use viewport::{DesktopContainerWidth, TabletContainerWidth, Viewport, ViewportConfig, ViewportMap};

/// Layout core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
