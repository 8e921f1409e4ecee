//! Template location on disk for the two invocation modes: a single
//! template directory, or a tree of template directories walked with
//! `walkdir`.

use crate::config::AppConfig;
use crate::error::{Result, TmplgenError};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Wildcard selection meaning "every template under the source directory".
pub const ALL_TEMPLATES: &str = "ALL";

/// Locates template files under a source directory.
#[derive(Debug)]
pub struct Finder {
    source_dir: PathBuf,
    template_file: String,
    data_file: String,
}

impl Finder {
    pub fn new(source_dir: impl Into<PathBuf>, config: &AppConfig) -> Self {
        Self {
            source_dir: source_dir.into(),
            template_file: config.template_file.clone(),
            data_file: config.data_file.clone(),
        }
    }

    /// Single-directory mode: the source directory itself must contain the
    /// template file and its data file.
    ///
    /// # Errors
    ///
    /// `TmplgenError::UnitFileNotFound` when either file is missing, with a
    /// hint pointing at `--multiple` for the tree layout.
    pub fn single_unit(&self) -> Result<Vec<PathBuf>> {
        let template_path = self.source_dir.join(&self.template_file);
        let data_path = self.source_dir.join(&self.data_file);

        if !template_path.is_file() {
            return Err(TmplgenError::UnitFileNotFound {
                kind: "template",
                search_dir: self.source_dir.clone(),
                expected: template_path,
            });
        }
        if !data_path.is_file() {
            return Err(TmplgenError::UnitFileNotFound {
                kind: "data",
                search_dir: self.source_dir.clone(),
                expected: data_path,
            });
        }
        Ok(vec![template_path])
    }

    /// Multi-directory mode: find the selected template, or walk the whole
    /// tree when `selection` is [`ALL_TEMPLATES`]. Results are sorted so
    /// processing order is deterministic.
    ///
    /// # Errors
    ///
    /// - `TmplgenError::TemplateNotFound` when a named selection does not
    ///   resolve to a template file.
    /// - `TmplgenError::NoTemplatesFound` when a wildcard search comes up
    ///   empty.
    /// - `TmplgenError::Io` for errors while walking the tree.
    pub fn find_templates(&self, selection: &str) -> Result<Vec<PathBuf>> {
        if selection != ALL_TEMPLATES {
            let template_path = self
                .source_dir
                .join(selection)
                .join(&self.template_file);
            if !template_path.is_file() {
                return Err(TmplgenError::TemplateNotFound {
                    name: selection.to_string(),
                    search_dir: self.source_dir.clone(),
                    template_file: self.template_file.clone(),
                });
            }
            return Ok(vec![template_path]);
        }

        let mut templates = Vec::new();
        for entry in WalkDir::new(&self.source_dir) {
            let entry = entry.map_err(|e| {
                TmplgenError::Io(e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::other("walkdir error without io cause")
                }))
            })?;
            if entry.file_type().is_file() && entry.file_name() == self.template_file.as_str() {
                templates.push(entry.into_path());
            }
        }
        templates.sort();

        if templates.is_empty() {
            return Err(TmplgenError::NoTemplatesFound {
                search_dir: self.source_dir.clone(),
                template_file: self.template_file.clone(),
            });
        }
        Ok(templates)
    }
}
