//! Output layout and file writing.
//!
//! ```text
//! <out>/
//! └── acme/            # one directory per `--module` segment, snake_cased
//!     └── models/
//!         ├── pet.rb
//!         └── status.rb
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ir::Type;
use crate::naming;
use crate::render::{EXTENSION, Metadata, render_type};

/// Split a `::`-separated module path. An empty path means no modules.
pub fn parse_modules(module: &str) -> Vec<String> {
    if module.trim().is_empty() {
        return Vec::new();
    }
    module
        .split("::")
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn output_dir(out: &Path, modules: &[String]) -> PathBuf {
    let mut path = out.to_path_buf();
    for module in modules {
        path.push(naming::file_name(module));
    }
    path
}

pub fn file_path(dir: &Path, t: &Type) -> PathBuf {
    dir.join(format!("{}.{EXTENSION}", t.file_name))
}

/// Render every type and write it under `dir`, in list order. With `dry_run`
/// the files are printed to stdout instead. Returns the paths produced.
pub fn write_types(
    dir: &Path,
    metadata: &Metadata,
    types: &[Type],
    dry_run: bool,
) -> Result<Vec<PathBuf>> {
    if !dry_run {
        fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let mut written = Vec::with_capacity(types.len());
    for t in types {
        let path = file_path(dir, t);
        let source = render_type(metadata, t);
        if dry_run {
            println!("=== {} ===\n{}", path.display(), source);
        } else {
            fs::write(&path, source).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), schema = %t.schema_name, "wrote type");
        }
        written.push(path);
    }
    Ok(written)
}
