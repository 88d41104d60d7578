//! # Gridmaker CLI
//!
//! Command-line host for Gridmaker layout documents.
//!
//! ## Usage
//!
//! ```bash
//! gridmaker validate layout.json
//! gridmaker report layout.json
//! gridmaker normalize layout.json --output clean.json
//! cat layout.json | gridmaker summary -
//! ```
//!
//! Every subcommand reads one layout document, from a file or from stdin
//! when the path is `-`. Command output goes to stdout; logs go to stderr.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use grid_core::{LayoutError, LayoutStore, Viewport};
use thiserror::Error;

/// Path that selects stdin instead of a file.
pub const STDIN_PATH: &str = "-";

/// Command-line arguments for gridmaker.
#[derive(Debug, Clone, Parser)]
#[command(name = "gridmaker")]
#[command(about = "Validate, report on and normalize grid layout documents")]
#[command(version)]
pub struct CliArgs {
    /// What to do with the document.
    #[command(subcommand)]
    pub command: Command,
}

/// Gridmaker subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check that a document imports cleanly.
    Validate {
        /// Layout document path, or `-` for stdin
        #[arg(env = "GRIDMAKER_INPUT", default_value = STDIN_PATH)]
        input: PathBuf,
    },
    /// Print the Markdown report for a document.
    Report {
        /// Layout document path, or `-` for stdin
        #[arg(env = "GRIDMAKER_INPUT", default_value = STDIN_PATH)]
        input: PathBuf,
    },
    /// Re-export a document in canonical form.
    Normalize {
        /// Layout document path, or `-` for stdin
        #[arg(env = "GRIDMAKER_INPUT", default_value = STDIN_PATH)]
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long, env = "GRIDMAKER_OUTPUT")]
        output: Option<PathBuf>,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print grid sizes and placement counts per viewport.
    Summary {
        /// Layout document path, or `-` for stdin
        #[arg(env = "GRIDMAKER_INPUT", default_value = STDIN_PATH)]
        input: PathBuf,
    },
}

impl Command {
    /// The document this command reads.
    #[must_use]
    pub fn input(&self) -> &Path {
        match self {
            Self::Validate { input }
            | Self::Report { input }
            | Self::Normalize { input, .. }
            | Self::Summary { input } => input,
        }
    }

    /// Subcommand name, for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validate { .. } => "validate",
            Self::Report { .. } => "report",
            Self::Normalize { .. } => "normalize",
            Self::Summary { .. } => "summary",
        }
    }
}

/// Errors from running a subcommand.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Input path as given.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The output file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Output path as given.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document was rejected.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The normalized document could not be serialized.
    #[error("Failed to serialize layout: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Read the document at `path`, taking stdin from `stdin` when the path is `-`.
///
/// # Errors
///
/// Returns [`CliError::Read`] if the file or stream cannot be read.
pub fn read_input(path: &Path, mut stdin: impl Read) -> Result<String, CliError> {
    let display = path.display().to_string();
    if path == Path::new(STDIN_PATH) {
        let mut text = String::new();
        stdin
            .read_to_string(&mut text)
            .map_err(|source| CliError::Read {
                path: display,
                source,
            })?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: display,
        source,
    })
}

/// Import `text` into a fresh store, applying all document validation.
fn load(text: &str) -> Result<LayoutStore, CliError> {
    let mut store = LayoutStore::new();
    store.import_document(text)?;
    Ok(store)
}

/// Run one subcommand and return what it prints on stdout.
///
/// `normalize --output` writes the file and returns a short confirmation.
///
/// # Errors
///
/// Returns a [`CliError`] if the input cannot be read, the document is
/// rejected, or the output cannot be written.
pub fn run(command: &Command, stdin: impl Read) -> Result<String, CliError> {
    let text = read_input(command.input(), stdin)?;
    let store = load(&text)?;
    tracing::debug!(
        command = command.name(),
        elements = store.state().elements().len(),
        "Loaded layout document"
    );

    match command {
        Command::Validate { input } => Ok(format!(
            "{}: valid layout document ({} element(s))\n",
            input.display(),
            store.state().elements().len()
        )),
        Command::Report { .. } => Ok(store.export_report()),
        Command::Normalize {
            output, compact, ..
        } => {
            let document = store.export_document();
            let mut json = if *compact {
                serde_json::to_string(&document)?
            } else {
                document.to_json_pretty()?
            };
            json.push('\n');
            match output {
                Some(path) => {
                    std::fs::write(path, &json).map_err(|source| CliError::Write {
                        path: path.display().to_string(),
                        source,
                    })?;
                    tracing::info!("Wrote normalized layout to {}", path.display());
                    Ok(format!("Wrote {}\n", path.display()))
                }
                None => Ok(json),
            }
        }
        Command::Summary { .. } => Ok(summarize(&store)),
    }
}

/// One line per viewport: grid size and how many elements are placed on it.
fn summarize(store: &LayoutStore) -> String {
    let state = store.state();
    let total = state.elements().len();
    let mut out = format!("{total} element(s)\n");
    for viewport in Viewport::ALL {
        let grid = state.grid(viewport);
        let placed = state
            .elements()
            .iter()
            .filter(|e| e.is_placed(viewport))
            .count();
        out.push_str(&format!(
            "{}: {} columns × {} rows, {placed}/{total} placed\n",
            viewport.label(),
            grid.cols,
            grid.rows
        ));
    }
    out
}
