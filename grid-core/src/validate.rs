//! Structural validation of untrusted layout documents.
//!
//! The validator walks a parsed [`serde_json::Value`] and either returns a
//! typed [`LayoutDocument`] or the first [`ValidationError`] found, tagged
//! with the path of the offending value. Unknown keys are ignored.
//!
//! Cross-field rules (duplicate ids, placements that must fit the grid) are
//! checked when the document is turned into state, see
//! [`LayoutDocument::into_state`].

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::grid::{GridDimensions, MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};
use crate::placement::Placement;
use crate::schema::{
    ContainerDocument, ElementDocument, LayoutDocument, PlacementsDocument,
    ViewportConfigDocument, DOCUMENT_VERSION,
};
use crate::viewport::{DesktopContainerWidth, TabletContainerWidth, Viewport, ViewportMap};

type Validated<T> = Result<T, ValidationError>;

/// Validate a parsed JSON value against the layout document schema.
///
/// # Errors
///
/// Returns the first violation found, in document order.
pub fn validate_document(value: &Value) -> Validated<LayoutDocument> {
    let root = object(value, "document")?;

    let version = integer(required(root, "", "version")?, "version")?;
    if version != i64::from(DOCUMENT_VERSION) {
        return Err(ValidationError::new(
            "version",
            format!("must equal {DOCUMENT_VERSION} (got {version})"),
        ));
    }

    let viewport_config = viewport_config(required(root, "", "viewportConfig")?)?;
    let grid = grid(required(root, "", "grid")?)?;

    let elements = required(root, "", "elements")?
        .as_array()
        .ok_or_else(|| ValidationError::new("elements", "expected an array"))?
        .iter()
        .enumerate()
        .map(|(index, value)| element(value, &format!("elements[{index}]")))
        .collect::<Validated<Vec<_>>>()?;

    Ok(LayoutDocument {
        version: DOCUMENT_VERSION,
        viewport_config,
        grid,
        elements,
    })
}

fn viewport_config(value: &Value) -> Validated<ViewportConfigDocument> {
    let path = "viewportConfig";
    let config = object(value, path)?;

    let desktop_path = join(path, "desktop");
    let desktop = object(required(config, path, "desktop")?, &desktop_path)?;
    let width_path = join(&desktop_path, "containerWidth");
    let width = integer(required(desktop, &desktop_path, "containerWidth")?, &width_path)?;
    let desktop = u8::try_from(width)
        .ok()
        .and_then(|w| DesktopContainerWidth::try_from(w).ok())
        .ok_or_else(|| {
            ValidationError::new(&width_path, format!("must be one of 12, 6, 4 (got {width})"))
        })?;

    let tablet_path = join(path, "tablet");
    let tablet = object(required(config, path, "tablet")?, &tablet_path)?;
    let width_path = join(&tablet_path, "containerWidth");
    let width = integer(required(tablet, &tablet_path, "containerWidth")?, &width_path)?;
    let tablet = u8::try_from(width)
        .ok()
        .and_then(|w| TabletContainerWidth::try_from(w).ok())
        .ok_or_else(|| {
            ValidationError::new(&width_path, format!("must be one of 8, 4 (got {width})"))
        })?;

    Ok(ViewportConfigDocument {
        desktop: ContainerDocument {
            container_width: desktop,
        },
        tablet: ContainerDocument {
            container_width: tablet,
        },
    })
}

fn grid(value: &Value) -> Validated<ViewportMap<GridDimensions>> {
    let path = "grid";
    let grid = object(value, path)?;
    let dims = |vp: Viewport| -> Validated<GridDimensions> {
        let vp_path = join(path, vp.as_str());
        let dims = object(required(grid, path, vp.as_str())?, &vp_path)?;
        let cols = bounded(
            required(dims, &vp_path, "cols")?,
            &join(&vp_path, "cols"),
            MIN_COLS,
            MAX_COLS,
        )?;
        let rows = bounded(
            required(dims, &vp_path, "rows")?,
            &join(&vp_path, "rows"),
            MIN_ROWS,
            MAX_ROWS,
        )?;
        Ok(GridDimensions { cols, rows })
    };
    Ok(ViewportMap::new(
        dims(Viewport::Desktop)?,
        dims(Viewport::Tablet)?,
        dims(Viewport::Mobile)?,
    ))
}

fn element(value: &Value, path: &str) -> Validated<ElementDocument> {
    let obj = object(value, path)?;
    let id = string(required(obj, path, "id")?, &join(path, "id"))?;
    let description = string(required(obj, path, "description")?, &join(path, "description"))?;

    let placements_path = join(path, "placements");
    let placements = object(required(obj, path, "placements")?, &placements_path)?;
    let slot = |vp: Viewport| -> Validated<Option<Placement>> {
        placements
            .get(vp.as_str())
            .map(|value| placement(value, &join(&placements_path, vp.as_str())))
            .transpose()
    };

    Ok(ElementDocument {
        id: id.to_string(),
        description: description.to_string(),
        placements: PlacementsDocument {
            desktop: slot(Viewport::Desktop)?,
            tablet: slot(Viewport::Tablet)?,
            mobile: slot(Viewport::Mobile)?,
        },
    })
}

fn placement(value: &Value, path: &str) -> Validated<Placement> {
    let obj = object(value, path)?;
    let field = |key: &str| -> Validated<u32> {
        bounded(required(obj, path, key)?, &join(path, key), 1, u32::MAX)
    };
    Ok(Placement {
        col: field("col")?,
        row: field("row")?,
        col_span: field("colSpan")?,
        row_span: field("rowSpan")?,
    })
}

// ---------------------------------------------------------------------------
// Primitive checks
// ---------------------------------------------------------------------------

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn object<'a>(value: &'a Value, path: &str) -> Validated<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::new(path, format!("expected an object, got {}", kind(value))))
}

fn required<'a>(obj: &'a Map<String, Value>, parent: &str, key: &str) -> Validated<&'a Value> {
    obj.get(key)
        .ok_or_else(|| ValidationError::new(join(parent, key), "is required"))
}

fn string<'a>(value: &'a Value, path: &str) -> Validated<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::new(path, format!("expected a string, got {}", kind(value))))
}

/// An integral JSON number. Floats with no fractional part (`2.0`) count.
fn integer(value: &Value, path: &str) -> Validated<i64> {
    let not_integer =
        || ValidationError::new(path, format!("expected an integer, got {}", kind(value)));
    let Value::Number(number) = value else {
        return Err(not_integer());
    };
    if let Some(i) = number.as_i64() {
        return Ok(i);
    }
    if number.is_u64() {
        return Err(ValidationError::new(path, "integer is too large"));
    }
    match number.as_f64() {
        #[allow(clippy::cast_possible_truncation)]
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(f as i64),
        _ => Err(not_integer()),
    }
}

fn bounded(value: &Value, path: &str, min: u32, max: u32) -> Validated<u32> {
    let n = integer(value, path)?;
    u32::try_from(n)
        .ok()
        .filter(|n| (min..=max).contains(n))
        .ok_or_else(|| {
            if max == u32::MAX {
                ValidationError::new(path, format!("must be a positive integer (got {n})"))
            } else {
                ValidationError::new(path, format!("must be between {min} and {max} (got {n})"))
            }
        })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "version": 1,
            "viewportConfig": {
                "desktop": { "containerWidth": 12 },
                "tablet": { "containerWidth": 8 }
            },
            "grid": {
                "desktop": { "cols": 6, "rows": 2 },
                "tablet": { "cols": 4, "rows": 2 },
                "mobile": { "cols": 1, "rows": 2 }
            },
            "elements": [
                {
                    "id": "el-1",
                    "description": "Hero",
                    "placements": {
                        "desktop": { "col": 1, "row": 1, "colSpan": 2, "rowSpan": 1 }
                    }
                }
            ]
        })
    }

    fn error_path(value: &Value) -> String {
        validate_document(value).expect_err("should be invalid").path
    }

    #[test]
    fn accepts_valid_document() {
        let doc = validate_document(&valid()).expect("valid");
        assert_eq!(doc.elements.len(), 1);
        assert_eq!(
            doc.elements[0].placements.desktop,
            Some(Placement::new(1, 1, 2, 1))
        );
        assert_eq!(doc.elements[0].placements.tablet, None);
        assert_eq!(doc.grid.tablet, GridDimensions { cols: 4, rows: 2 });
    }

    #[test]
    fn rejects_non_object_root() {
        assert_eq!(error_path(&json!([1, 2])), "document");
    }

    #[test]
    fn rejects_other_versions() {
        let mut value = valid();
        value["version"] = json!(2);
        let err = validate_document(&value).expect_err("version 2");
        assert_eq!(err.path, "version");
        assert!(err.message.contains("must equal 1"));

        value["version"] = json!("1");
        assert_eq!(error_path(&value), "version");
    }

    #[test]
    fn rejects_missing_fields_with_path() {
        let mut value = valid();
        value["grid"]
            .as_object_mut()
            .expect("object")
            .remove("mobile");
        let err = validate_document(&value).expect_err("missing mobile");
        assert_eq!(err.path, "grid.mobile");
        assert_eq!(err.message, "is required");
    }

    #[test]
    fn rejects_container_width_outside_set() {
        let mut value = valid();
        value["viewportConfig"]["desktop"]["containerWidth"] = json!(8);
        assert_eq!(error_path(&value), "viewportConfig.desktop.containerWidth");

        let mut value = valid();
        value["viewportConfig"]["tablet"]["containerWidth"] = json!(12);
        assert_eq!(error_path(&value), "viewportConfig.tablet.containerWidth");
    }

    #[test]
    fn rejects_grid_out_of_bounds() {
        let mut value = valid();
        value["grid"]["desktop"]["cols"] = json!(25);
        assert_eq!(error_path(&value), "grid.desktop.cols");

        let mut value = valid();
        value["grid"]["tablet"]["rows"] = json!(0);
        assert_eq!(error_path(&value), "grid.tablet.rows");

        let mut value = valid();
        value["grid"]["mobile"]["rows"] = json!(1.5);
        assert_eq!(error_path(&value), "grid.mobile.rows");
    }

    #[test]
    fn accepts_integral_floats() {
        let mut value = valid();
        value["grid"]["desktop"]["cols"] = json!(8.0);
        let doc = validate_document(&value).expect("valid");
        assert_eq!(doc.grid.desktop.cols, 8);
    }

    #[test]
    fn rejects_bad_element_fields() {
        let mut value = valid();
        value["elements"][0]["id"] = json!(7);
        assert_eq!(error_path(&value), "elements[0].id");

        let mut value = valid();
        value["elements"][0]["description"] = Value::Null;
        assert_eq!(error_path(&value), "elements[0].description");

        let mut value = valid();
        value["elements"][0]["placements"]["desktop"]["colSpan"] = json!(0);
        assert_eq!(error_path(&value), "elements[0].placements.desktop.colSpan");

        let mut value = valid();
        value["elements"][0]["placements"]["tablet"] = Value::Null;
        assert_eq!(error_path(&value), "elements[0].placements.tablet");

        let mut value = valid();
        value["elements"] = json!({});
        assert_eq!(error_path(&value), "elements");
    }

    #[test]
    fn ignores_unknown_keys() {
        let mut value = valid();
        value["exportedBy"] = json!("someone");
        value["elements"][0]["placements"]["watch"] = json!(true);
        assert!(validate_document(&value).is_ok());
    }
}
