use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::java_renderer::{self, RenderedFile};
use crate::model::Model;
use crate::templates::Templates;

/// Renders the model and writes the project under the configured output
/// root. Returns the written paths.
pub fn generate(model: &Model, config: &GeneratorConfig) -> Result<Vec<PathBuf>> {
    let templates = Templates::load_or_default(config.template_dir.as_deref())?;
    let files = java_renderer::render_project(model, config, &templates);
    write_project(&config.output_dir, &files)
}

pub fn write_project(root: &Path, files: &[RenderedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = root.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.contents).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = path.display().to_string(); "Wrote file");
        written.push(path);
    }
    Ok(written)
}
