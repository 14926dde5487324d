//! Generate Sorbet-typed Ruby data classes from the component schemas of an
//! OpenAPI 3.x document.
//!
//! The pipeline is: [`document::load_document`] → [`resolve::resolve_document`]
//! → [`collisions::drop_collisions`] → [`output::write_types`]. Everything
//! before writing happens in memory, so a run either produces the full set of
//! files or stops at the first fatal [`Error`].

pub mod cli;
pub mod collisions;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod ir;
pub mod naming;
pub mod output;
pub mod path_de;
pub mod render;
pub mod resolve;

use std::path::PathBuf;

pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink};
pub use error::{Error, Result};
pub use ir::{EnumValue, Property, Shape, Type};

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAPI document to read.
    pub path: PathBuf,
    /// `::`-separated Ruby module path; empty for none.
    pub module: String,
    /// Output root.
    pub out: PathBuf,
    pub dry_run: bool,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct Report {
    pub types: Vec<Type>,
    pub files: Vec<PathBuf>,
}

/// Load, resolve, render and write. Degradations go to `sink`; only I/O and
/// document errors are returned.
pub fn run(config: &Config, sink: &mut dyn DiagnosticSink) -> Result<Report> {
    let document = document::load_document(&config.path)?;
    tracing::info!(
        path = %config.path.display(),
        title = %document.info.title,
        schemas = document.components.schemas.len(),
        "loaded OpenAPI document"
    );

    let types = resolve::resolve_document(&document, sink);
    let types = collisions::drop_collisions(types, sink);

    let modules = output::parse_modules(&config.module);
    let dir = output::output_dir(&config.out, &modules);
    let metadata = render::Metadata::new(&document, modules);
    let files = output::write_types(&dir, &metadata, &types, config.dry_run)?;

    Ok(Report { types, files })
}
