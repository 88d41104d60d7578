//! WebAssembly bindings for grid-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! Viewports are passed as their lowercase names.

use wasm_bindgen::prelude::*;

use crate::{
    Action, DesktopContainerWidth, DropSource, ElementId, GridGeometry, LayoutStore, Placement,
    ResizeDrag, TabletContainerWidth, Viewport,
};

/// Initialize the layout WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

fn viewport(name: &str) -> Result<Viewport, String> {
    Viewport::parse(name).ok_or_else(|| format!("Unknown viewport: {name}"))
}

/// Layout store instance for WASM.
#[wasm_bindgen]
pub struct WasmLayout {
    store: LayoutStore,
}

#[wasm_bindgen]
impl WasmLayout {
    /// Create a layout holding the initial state.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: LayoutStore::new(),
        }
    }

    /// Store revision; changes whenever the state does.
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn revision(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let revision = self.store.revision() as f64;
        revision
    }

    /// Active viewport name.
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn viewport(&self) -> String {
        self.store.state().viewport.as_str().to_string()
    }

    /// Whether an import would discard user work.
    #[wasm_bindgen(js_name = hasContent)]
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.store.state().has_content()
    }

    /// Apply a JSON-encoded action (`{"type": "addRow"}`, ...).
    ///
    /// # Errors
    ///
    /// Returns an error string if the action is malformed or an import fails.
    pub fn dispatch(&mut self, action_json: &str) -> Result<(), String> {
        let action: Action = serde_json::from_str(action_json).map_err(|e| e.to_string())?;
        self.store.dispatch(action).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Switch the viewport being edited.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown viewport name.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, name: &str) -> Result<(), String> {
        self.store.set_viewport(viewport(name)?);
        Ok(())
    }

    /// Set the desktop container width (12, 6 or 4).
    ///
    /// # Errors
    ///
    /// Returns an error string for any other width.
    #[wasm_bindgen(js_name = setDesktopContainerWidth)]
    pub fn set_desktop_container_width(&mut self, width: u8) -> Result<(), String> {
        self.store
            .set_desktop_container_width(DesktopContainerWidth::try_from(width)?);
        Ok(())
    }

    /// Set the tablet container width (8 or 4).
    ///
    /// # Errors
    ///
    /// Returns an error string for any other width.
    #[wasm_bindgen(js_name = setTabletContainerWidth)]
    pub fn set_tablet_container_width(&mut self, width: u8) -> Result<(), String> {
        self.store
            .set_tablet_container_width(TabletContainerWidth::try_from(width)?);
        Ok(())
    }

    /// Resize the active viewport's column count.
    #[wasm_bindgen(js_name = setGridCols)]
    pub fn set_grid_cols(&mut self, cols: u32) {
        self.store.set_grid_cols(cols);
    }

    /// Resize the active viewport's row count.
    #[wasm_bindgen(js_name = setGridRows)]
    pub fn set_grid_rows(&mut self, rows: u32) {
        self.store.set_grid_rows(rows);
    }

    /// Append a row to the active viewport's grid.
    #[wasm_bindgen(js_name = addRow)]
    pub fn add_row(&mut self) {
        self.store.add_row();
    }

    /// Delete a 1-based row from the active viewport's grid.
    #[wasm_bindgen(js_name = removeRow)]
    pub fn remove_row(&mut self, index: u32) {
        self.store.remove_row(index);
    }

    /// Append a column to the active viewport's grid.
    #[wasm_bindgen(js_name = addColumn)]
    pub fn add_column(&mut self) {
        self.store.add_column();
    }

    /// Delete a 1-based column from the active viewport's grid.
    #[wasm_bindgen(js_name = removeColumn)]
    pub fn remove_column(&mut self, index: u32) {
        self.store.remove_column(index);
    }

    /// Create an element and return its id.
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(&mut self, description: &str) -> String {
        self.store.add_element(description).to_string()
    }

    /// Delete an element.
    #[wasm_bindgen(js_name = removeElement)]
    pub fn remove_element(&mut self, id: &str) {
        self.store.remove_element(&ElementId::from(id));
    }

    /// Replace an element's description.
    #[wasm_bindgen(js_name = updateElementDescription)]
    pub fn update_element_description(&mut self, id: &str, description: &str) {
        self.store
            .update_element_description(&ElementId::from(id), description);
    }

    /// Place an element on a viewport.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown viewport name.
    #[wasm_bindgen(js_name = setPlacement)]
    pub fn set_placement(
        &mut self,
        id: &str,
        viewport_name: &str,
        col: u32,
        row: u32,
        col_span: u32,
        row_span: u32,
    ) -> Result<(), String> {
        self.store.set_placement(
            &ElementId::from(id),
            viewport(viewport_name)?,
            Some(Placement::new(col, row, col_span, row_span)),
        );
        Ok(())
    }

    /// Remove an element from a viewport's grid.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown viewport name.
    #[wasm_bindgen(js_name = clearPlacement)]
    pub fn clear_placement(&mut self, id: &str, viewport_name: &str) -> Result<(), String> {
        self.store
            .set_placement(&ElementId::from(id), viewport(viewport_name)?, None);
        Ok(())
    }

    /// Move an element's existing placement.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown viewport name.
    #[wasm_bindgen(js_name = movePlacement)]
    pub fn move_placement(
        &mut self,
        id: &str,
        viewport_name: &str,
        col: u32,
        row: u32,
    ) -> Result<(), String> {
        self.store
            .move_placement(&ElementId::from(id), viewport(viewport_name)?, col, row);
        Ok(())
    }

    /// Resize an element's existing placement.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown viewport name.
    #[wasm_bindgen(js_name = resizePlacement)]
    pub fn resize_placement(
        &mut self,
        id: &str,
        viewport_name: &str,
        col_span: u32,
        row_span: u32,
    ) -> Result<(), String> {
        self.store.resize_placement(
            &ElementId::from(id),
            viewport(viewport_name)?,
            col_span,
            row_span,
        );
        Ok(())
    }

    /// Drop an element on a cell. `from_grid` is true when an existing
    /// block was dragged, false for an item dragged in from the palette.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown viewport name.
    #[wasm_bindgen(js_name = dropAt)]
    pub fn drop_at(
        &mut self,
        id: &str,
        viewport_name: &str,
        col: u32,
        row: u32,
        from_grid: bool,
    ) -> Result<(), String> {
        let source = if from_grid {
            DropSource::Grid
        } else {
            DropSource::Palette
        };
        self.store
            .drop_at(&ElementId::from(id), viewport(viewport_name)?, col, row, source);
        Ok(())
    }

    /// Resize a placed element so its far corner follows the pointer.
    ///
    /// `width` and `height` are the rendered grid size in pixels, `x` and `y`
    /// the pointer offset from the grid's top-left corner. Called once per
    /// pointer move; an unplaced element is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown viewport name.
    #[wasm_bindgen(js_name = resizeFromPointer)]
    pub fn resize_from_pointer(
        &mut self,
        id: &str,
        viewport_name: &str,
        width: f32,
        height: f32,
        x: f32,
        y: f32,
    ) -> Result<(), String> {
        let viewport = viewport(viewport_name)?;
        let grid = self.store.state().grid(viewport);
        let geometry = GridGeometry::new(width, height, grid.cols, grid.rows);
        let Some(drag) = ResizeDrag::begin(self.store.state(), &ElementId::from(id), viewport)
        else {
            return Ok(());
        };
        self.store
            .dispatch(drag.pointer_moved(&geometry, x, y))
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Replace the layout with a JSON layout document.
    ///
    /// # Errors
    ///
    /// Returns the parse or validation message; the layout is unchanged.
    #[wasm_bindgen(js_name = importDocument)]
    pub fn import_document(&mut self, json: &str) -> Result<(), String> {
        self.store.import_document(json).map_err(|e| e.to_string())
    }

    /// Current layout as pretty-printed JSON.
    #[wasm_bindgen(js_name = exportJson)]
    #[must_use]
    pub fn export_json(&self) -> String {
        self.store.export_json()
    }

    /// Current layout as a Markdown report.
    #[wasm_bindgen(js_name = exportReport)]
    #[must_use]
    pub fn export_report(&self) -> String {
        self.store.export_report()
    }
}

impl Default for WasmLayout {
    fn default() -> Self {
        Self::new()
    }
}
