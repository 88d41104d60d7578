//! Human-readable layout report.
//!
//! The report is Markdown meant to be pasted into a ticket or handed to
//! whoever builds the page. It is not re-importable.

use std::fmt::Write as _;

use crate::state::LayoutState;
use crate::viewport::Viewport;

/// Render the report for a state.
#[must_use]
pub fn render_report(state: &LayoutState) -> String {
    let mut out = String::new();
    out.push_str("# Tailwind Grid Layout\n\n");

    out.push_str("## Grid dimensions\n");
    for (vp, g) in state.grids().iter() {
        let _ = writeln!(out, "- **{}**: {} columns × {} rows", vp.label(), g.cols, g.rows);
    }
    out.push('\n');

    out.push_str("## Container width (in 12-col context)\n");
    let config = state.viewport_config;
    let _ = writeln!(out, "- **Desktop**: {}/12 columns", config.desktop.columns());
    let _ = writeln!(out, "- **Tablet**: {}/8 columns", config.tablet.columns());
    out.push_str("- **Mobile**: full width\n\n");

    for vp in Viewport::ALL {
        let _ = writeln!(out, "## {}", vp.label());
        let mut placed = state.elements().placed_on(vp).peekable();
        if placed.peek().is_none() {
            out.push_str("No elements placed.\n");
        }
        for (element, p) in placed {
            let _ = writeln!(
                out,
                "- **{}**: col {}, row {}, col-span {}, row-span {}",
                element.description, p.col, p.row, p.col_span, p.row_span
            );
        }
        out.push('\n');
    }

    // Sections are separated by blank lines; the report ends with exactly one newline.
    out.pop();
    out
}
