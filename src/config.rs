use crate::error::{Result, TmplgenError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Process-wide defaults, read once at startup and treated as read-only
/// for the rest of the run. Per-unit overrides from a `# config` directive
/// are applied to a derived copy, never to this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root directory for generated files
    pub output_dir: PathBuf,
    /// Extension for generated files, without a leading dot ("" = none)
    pub output_extension: String,
    /// File name that identifies a template inside a template directory
    pub template_file: String,
    /// File name of the data file expected next to each template
    pub data_file: String,
    /// Base name for output files that carry no explicit `# file:` path
    pub default_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            output_extension: String::new(),
            template_file: "template.j2".to_string(),
            data_file: "data.yaml".to_string(),
            default_prefix: "file".to_string(),
        }
    }
}

/// On-disk shape of the config file. Every key is optional; present keys
/// override the built-in defaults field by field.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    output_dir: Option<PathBuf>,
    output_extension: Option<String>,
    template_file: Option<String>,
    data_file: Option<String>,
    default_prefix: Option<String>,
}

impl AppConfig {
    /// Loads configuration from a YAML file, falling back to the built-in
    /// defaults for keys the file does not set. A missing file is not an
    /// error; it means "all defaults".
    ///
    /// # Errors
    ///
    /// - `TmplgenError::Config` if the file exists but cannot be read.
    /// - `TmplgenError::Decode` if the file is not valid YAML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| TmplgenError::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        let raw: RawConfig =
            serde_yaml::from_str(&content).map_err(|e| TmplgenError::Decode {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut config = Self::default();
        if let Some(dir) = raw.output_dir {
            config.output_dir = dir;
        }
        if let Some(ext) = raw.output_extension {
            config.output_extension = normalize_extension(&ext);
        }
        if let Some(name) = raw.template_file {
            config.template_file = name;
        }
        if let Some(name) = raw.data_file {
            config.data_file = name;
        }
        if let Some(prefix) = raw.default_prefix {
            config.default_prefix = prefix;
        }
        Ok(config)
    }
}

/// Strips a single leading dot so ".yaml" and "yaml" configure the same thing.
pub fn normalize_extension(ext: &str) -> String {
    ext.strip_prefix('.').unwrap_or(ext).to_string()
}
