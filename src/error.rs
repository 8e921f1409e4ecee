use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tmplgen operations
#[derive(Error, Debug)]
pub enum TmplgenError {
    /// IO error outside of segment writing (reading templates, cleaning)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Template rendering failure from the template engine
    #[error("failed to render template {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    /// Malformed YAML in a data or config file
    #[error("failed to decode YAML in {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Template file not found, with a hint about the expected layout
    #[error(
        "template '{name}' not found in {search_dir}\n\n\
         Expected {search_dir}/{name}/{template_file}.\n\
         To process a single directory containing {template_file} and a data \
         file directly, run without --multiple.",
        search_dir = .search_dir.display()
    )]
    TemplateNotFound {
        name: String,
        search_dir: PathBuf,
        template_file: String,
    },

    /// Single-directory mode is missing its template or data file
    #[error(
        "{kind} file not found in {search_dir}: expected {expected}\n\n\
         If your templates live in subdirectories, use --multiple:\n  \
         tmplgen --multiple {search_dir}",
        search_dir = .search_dir.display(),
        expected = .expected.display()
    )]
    UnitFileNotFound {
        kind: &'static str,
        search_dir: PathBuf,
        expected: PathBuf,
    },

    /// No template files anywhere under the search directory
    #[error(
        "no template files named '{template_file}' found under {search_dir}",
        search_dir = .search_dir.display()
    )]
    NoTemplatesFound {
        search_dir: PathBuf,
        template_file: String,
    },

    /// IO failure while persisting a segment or creating its directories
    #[error("failed to write {path}: {source}", path = .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file exists but could not be read
    #[error("failed to read config file {path}: {source}", path = .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TmplgenError {
    /// Wraps an io error as a `Write` error for the given output path.
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TmplgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TmplgenError::Write {
            path: PathBuf::from("/out/file-01"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(format!("{err}"), "failed to write /out/file-01: denied");

        let err = TmplgenError::TemplateNotFound {
            name: "nginx".to_string(),
            search_dir: PathBuf::from("templates"),
            template_file: "template.j2".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("template 'nginx' not found in templates"));
        assert!(msg.contains("templates/nginx/template.j2"));

        let err = TmplgenError::UnitFileNotFound {
            kind: "data",
            search_dir: PathBuf::from("templates/app"),
            expected: PathBuf::from("templates/app/data.yaml"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("data file not found in templates/app"));
        assert!(msg.contains("--multiple"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: TmplgenError = io_err.into();
        assert!(matches!(err, TmplgenError::Io(_)));
    }

    #[test]
    fn test_write_helper_keeps_path() {
        let err = TmplgenError::write("out/x", io::Error::other("boom"));
        match err {
            TmplgenError::Write { path, .. } => assert_eq!(path, PathBuf::from("out/x")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
