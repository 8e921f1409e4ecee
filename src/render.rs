//! Collaborators for one unit: the YAML data loader and the template
//! renderer. The templating language is opaque to the splitting engine;
//! this module is the only place that knows it is minijinja.

use crate::error::{Result, TmplgenError};
use minijinja::Environment;
use std::fs;
use std::path::Path;

/// Loads a data file into an opaque YAML value.
///
/// # Errors
///
/// - `TmplgenError::Io` if the file cannot be read.
/// - `TmplgenError::Decode` if the content is not valid YAML.
pub fn load_data(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| TmplgenError::Decode {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Renders the template file at `path` against `data` and returns the
/// produced text.
///
/// # Errors
///
/// - `TmplgenError::Io` if the template file cannot be read.
/// - `TmplgenError::Render` if the template fails to parse or evaluate.
pub fn render_template(path: &Path, data: &serde_yaml::Value) -> Result<String> {
    let source = fs::read_to_string(path)?;

    let mut env = Environment::new();
    // Rendered blocks are consumed line by line; keep the final newline
    // instead of the Jinja2 default of stripping it.
    env.set_keep_trailing_newline(true);
    let template = env
        .template_from_str(&source)
        .map_err(|e| TmplgenError::Render {
            path: path.to_path_buf(),
            source: e,
        })?;
    template
        .render(minijinja::Value::from_serialize(data))
        .map_err(|e| TmplgenError::Render {
            path: path.to_path_buf(),
            source: e,
        })
}
