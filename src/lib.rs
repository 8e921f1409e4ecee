//! # tmplgen
//!
//! A library and CLI tool that renders text templates against YAML data and
//! splits the rendered output into one or more files, driven by directives
//! embedded in the rendered text itself.
//!
//! ## Directives
//!
//! - `# config ... key=value ...` on the first rendered line overrides the
//!   output extension (`ext=`) and separator splitting (`separate=`) for
//!   that block only.
//! - `# file: relative/path` at the start of a segment routes it to an
//!   explicit path instead of the default `{prefix}-NN.{ext}` name.
//! - A line containing exactly `---` closes the current segment.
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use std::path::Path;
//! use tmplgen::{AppConfig, Processor};
//!
//! let config = AppConfig::default();
//! let processor = Processor::new(config, true);
//!
//! match processor.process_template(Path::new("templates/app/template.j2"), false) {
//!     Ok(()) => println!("done"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Render every template directory under ./templates
//! tmplgen --multiple ./templates
//!
//! # Render a single template directory into ./generated
//! tmplgen -o generated ./templates/app
//! ```

pub mod config;
pub mod directive;
pub mod error;
pub mod finder;
pub mod naming;
pub mod process;
pub mod render;
pub mod split;
pub mod writer;

// Re-export main types and functions for convenience
pub use config::AppConfig;
pub use directive::{ConfigOverrides, parse_config_line, parse_file_line};
pub use error::{Result, TmplgenError};
pub use finder::{ALL_TEMPLATES, Finder};
pub use process::Processor;
pub use split::{Segment, split_segments};
