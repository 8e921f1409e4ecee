//! The per-unit orchestrator: render a template against its data file,
//! recognize a leading `# config` directive, split the output into
//! segments, resolve each segment's output path and persist it.
//!
//! A unit runs to completion or fails; the first write failure aborts the
//! remaining segments of that unit. The processor holds an immutable
//! snapshot of the process-wide defaults; a config directive only ever
//! derives a per-unit copy.

use crate::config::AppConfig;
use crate::directive;
use crate::error::Result;
use crate::naming;
use crate::render;
use crate::split::{self, Segment};
use crate::writer;
use std::path::{Path, PathBuf};

/// Settings in effect for one unit, derived from the process-wide defaults
/// and at most one `# config` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EffectiveSettings {
    extension: String,
    separate: bool,
}

/// Processes template/data units against a fixed configuration snapshot.
#[derive(Debug)]
pub struct Processor {
    config: AppConfig,
    default_separate: bool,
}

impl Processor {
    /// Creates a processor over the given defaults. `default_separate`
    /// controls separator splitting for blocks whose config directive does
    /// not say otherwise.
    pub fn new(config: AppConfig, default_separate: bool) -> Self {
        Self {
            config,
            default_separate,
        }
    }

    /// Processes one unit end to end: load the data file next to the
    /// template, render, then split and write the output.
    ///
    /// In multi-template mode the output lands under
    /// `{output_dir}/{template_name}/` and default-named files use the
    /// template name as prefix; single mode writes flat into `output_dir`
    /// with the configured default prefix.
    ///
    /// # Errors
    ///
    /// Any of `Render`, `Decode`, `Io` or `Write`; the first error ends the
    /// unit and nothing further is written.
    pub fn process_template(&self, template_path: &Path, multiple: bool) -> Result<()> {
        let data_path = template_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(&self.config.data_file);
        let data = render::load_data(&data_path)?;
        let rendered = render::render_template(template_path, &data)?;

        let template_name = template_name_of(template_path);
        let (output_dir, prefix) = if multiple {
            (
                self.config.output_dir.join(&template_name),
                template_name.clone(),
            )
        } else {
            (
                self.config.output_dir.clone(),
                self.config.default_prefix.clone(),
            )
        };

        self.process_rendered(&rendered, &output_dir, &prefix)
    }

    /// Splits an already rendered block and writes its segments under
    /// `output_dir`. Exposed separately so the splitting engine can be
    /// driven without a template on disk.
    ///
    /// # Errors
    ///
    /// `TmplgenError::Write` on the first failing segment; later segments
    /// are not attempted.
    pub fn process_rendered(&self, rendered: &str, output_dir: &Path, prefix: &str) -> Result<()> {
        let (settings, body) = self.effective_settings(rendered);

        let segments = if settings.separate {
            split::split_segments(body)
        } else {
            vec![split::single_segment(body)]
        };

        for (ordinal, segment) in segments
            .iter()
            .filter(|s| !s.content.is_empty())
            .enumerate()
        {
            let output_path = resolve_output_path(segment, output_dir, prefix, &settings, ordinal);
            writer::write_segment(&output_path, &segment.content)?;
        }
        Ok(())
    }

    /// Inspects the first line for a config directive and returns the
    /// per-unit settings plus the body with the directive stripped.
    fn effective_settings<'a>(&self, rendered: &'a str) -> (EffectiveSettings, &'a str) {
        let mut settings = EffectiveSettings {
            extension: self.config.output_extension.clone(),
            separate: self.default_separate,
        };

        let (first_line, rest) = rendered.split_once('\n').unwrap_or((rendered, ""));
        match directive::parse_config_line(first_line) {
            Some(overrides) => {
                if let Some(ext) = overrides.extension {
                    settings.extension = ext;
                }
                if let Some(separate) = overrides.separate {
                    settings.separate = separate;
                }
                (settings, rest)
            }
            None => (settings, rendered),
        }
    }
}

/// Explicit `# file:` path, or the computed default name. The ordinal is
/// the count of segments already written for this block.
fn resolve_output_path(
    segment: &Segment,
    output_dir: &Path,
    prefix: &str,
    settings: &EffectiveSettings,
    ordinal: usize,
) -> PathBuf {
    match &segment.path {
        Some(explicit) => output_dir.join(explicit),
        None => output_dir.join(naming::output_file_name(&settings.extension, prefix, ordinal)),
    }
}

/// A template is named after its containing directory.
fn template_name_of(template_path: &Path) -> String {
    template_path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "template".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TmplgenError;
    use std::fs;
    use tempfile::TempDir;

    fn processor(output_dir: &Path) -> Processor {
        let config = AppConfig {
            output_dir: output_dir.to_path_buf(),
            ..AppConfig::default()
        };
        Processor::new(config, true)
    }

    #[test]
    fn test_separator_splitting_ordinals() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        processor(out)
            .process_rendered("A\n---\nB\n---\nC\n", out, "file")
            .unwrap();

        assert_eq!(fs::read_to_string(out.join("file")).unwrap(), "A\n");
        assert_eq!(fs::read_to_string(out.join("file-01")).unwrap(), "B\n");
        assert_eq!(fs::read_to_string(out.join("file-02")).unwrap(), "C\n");
        assert_eq!(fs::read_dir(out).unwrap().count(), 3);
    }

    #[test]
    fn test_empty_segments_consume_no_ordinal() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        processor(out)
            .process_rendered("---\n---\nA\n", out, "file")
            .unwrap();

        assert_eq!(fs::read_to_string(out.join("file")).unwrap(), "A\n");
        assert_eq!(fs::read_dir(out).unwrap().count(), 1);
    }

    #[test]
    fn test_config_override_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        processor(out)
            .process_rendered(
                "# config x y ext=md separate=false\nHello\n---\nWorld\n",
                out,
                "file",
            )
            .unwrap();

        // One file, directive line gone, separator kept verbatim
        assert_eq!(
            fs::read_to_string(out.join("file.md")).unwrap(),
            "Hello\n---\nWorld\n"
        );
        assert_eq!(fs::read_dir(out).unwrap().count(), 1);
    }

    #[test]
    fn test_config_scoped_to_one_block() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        let processor = processor(out);

        processor
            .process_rendered("# config x y ext=md\nfirst\n", out, "a")
            .unwrap();
        processor.process_rendered("second\n", out, "b").unwrap();

        // The second block falls back to the default (empty) extension
        assert!(out.join("a.md").is_file());
        assert!(out.join("b").is_file());
    }

    #[test]
    fn test_file_directive_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        processor(out)
            .process_rendered("# file: custom/out.txt\nHello\n", out, "file")
            .unwrap();

        assert_eq!(
            fs::read_to_string(out.join("custom/out.txt")).unwrap(),
            "Hello\n"
        );
        assert!(!out.join("file").exists());
    }

    #[test]
    fn test_pathed_segments_share_ordinal_sequence() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        processor(out)
            .process_rendered("A\n---\n# file: named.txt\nB\n---\nC\n", out, "file")
            .unwrap();

        // The named segment still consumes ordinal 1
        assert_eq!(fs::read_to_string(out.join("file")).unwrap(), "A\n");
        assert_eq!(fs::read_to_string(out.join("named.txt")).unwrap(), "B\n");
        assert_eq!(fs::read_to_string(out.join("file-02")).unwrap(), "C\n");
    }

    #[test]
    fn test_write_failure_aborts_remaining_segments() {
        let temp_dir = TempDir::new().unwrap();
        // A file where the output directory should be
        let blocked = temp_dir.path().join("blocked");
        fs::write(&blocked, "").unwrap();

        let result =
            processor(&blocked).process_rendered("A\n---\nB\n", &blocked, "file");
        assert!(matches!(result, Err(TmplgenError::Write { .. })));
        // Still a plain file; nothing was written anywhere
        assert!(blocked.is_file());
    }

    #[test]
    fn test_empty_block_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        let processor = processor(out);

        processor.process_rendered("", out, "file").unwrap();
        processor
            .process_rendered("# config x y separate=false\n", out, "file")
            .unwrap();
        assert_eq!(fs::read_dir(out).unwrap().count(), 0);
    }

    fn write_unit(root: &Path, name: &str, template: &str, data: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("template.j2"), template).unwrap();
        fs::write(dir.join("data.yaml"), data).unwrap();
        dir.join("template.j2")
    }

    #[test]
    fn test_process_template_single_mode() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");
        let template = write_unit(
            temp_dir.path(),
            "app",
            "{% for s in services %}name: {{ s }}\n---\n{% endfor %}",
            "services: [web, db]",
        );

        processor(&out).process_template(&template, false).unwrap();
        assert_eq!(fs::read_to_string(out.join("file")).unwrap(), "name: web\n");
        assert_eq!(fs::read_to_string(out.join("file-01")).unwrap(), "name: db\n");
    }

    #[test]
    fn test_process_template_multiple_mode_uses_template_name() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");
        let template = write_unit(
            temp_dir.path(),
            "nginx",
            "server: {{ host }}\n",
            "host: localhost",
        );

        processor(&out).process_template(&template, true).unwrap();
        assert_eq!(
            fs::read_to_string(out.join("nginx").join("nginx")).unwrap(),
            "server: localhost\n"
        );
    }

    #[test]
    fn test_process_template_missing_data() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("app");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("template.j2"), "x\n").unwrap();

        let out = temp_dir.path().join("out");
        let result = processor(&out).process_template(&dir.join("template.j2"), false);
        assert!(matches!(result, Err(TmplgenError::Io(_))));
    }

    #[test]
    fn test_process_template_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");
        let template = write_unit(temp_dir.path(), "app", "v: {{ v }}\n", "v: 1");

        let processor = processor(&out);
        processor.process_template(&template, false).unwrap();
        let first = fs::read(out.join("file")).unwrap();
        processor.process_template(&template, false).unwrap();
        assert_eq!(fs::read(out.join("file")).unwrap(), first);
    }
}
