//! Directory-level generation: one Python module per schema file plus an
//! `__init__.py` re-exporting all of them.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::JsonSchemaToClassError;
use crate::naming::to_module_name;
use crate::settings::GenerateSettings;
use crate::writer::write_if_changed;

/// `*.json` files directly inside `dir`, sorted by path.
fn schema_files(dir: &Path) -> Result<Vec<PathBuf>, JsonSchemaToClassError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<_, io::Error>>()?;
    paths.retain(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"));
    paths.sort();
    Ok(paths)
}

/// Generate a module for every schema file in `schema_dir` into `output_dir`.
///
/// Module names are the snake_case file stems. Returns the generated module
/// paths in schema file order; `__init__.py` is not included.
///
/// # Errors
///
/// Returns the first error of any schema file, or
/// `JsonSchemaToClassError::Io` if directories cannot be read or created, or
/// two schema files map to the same module name.
pub fn generate_dir(
    schema_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    settings: &GenerateSettings,
) -> Result<Vec<PathBuf>, JsonSchemaToClassError> {
    let schema_dir: &Path = schema_dir.as_ref();
    let output_dir: &Path = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut modules: BTreeSet<String> = BTreeSet::new();
    let mut output_paths: Vec<PathBuf> = Vec::new();
    for schema_path in schema_files(schema_dir)? {
        let stem: String = schema_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let module: String = to_module_name(&stem);
        if !modules.insert(module.clone()) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!(
                    "{} maps to module {module}, which another schema already uses",
                    schema_path.display()
                ),
            )
            .into());
        }

        let output_path: PathBuf = output_dir.join(format!("{module}.py"));
        debug!(schema = %schema_path.display(), module = %module, "generating module");
        crate::generate_file(&schema_path, &output_path, settings)?;
        output_paths.push(output_path);
    }

    let index: String = init_module(&modules, &settings.line_break);
    write_if_changed(output_dir.join("__init__.py"), &index)?;
    Ok(output_paths)
}

/// `from .<module> import *` per module, sorted, each line terminated.
fn init_module(modules: &BTreeSet<String>, line_break: &str) -> String {
    let lines: Vec<String> = modules
        .iter()
        .map(|module| format!("from .{module} import *"))
        .collect();
    let mut index: String = lines.join(line_break);
    index.push_str(line_break);
    index
}
