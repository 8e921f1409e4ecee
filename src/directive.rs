//! Recognition of the two directive forms embedded in rendered output:
//! a leading `# config` line and per-segment `# file:` lines. Both parsers
//! are pure functions over a single line; the caller decides where they
//! apply (the config directive only counts on the first line of a block).

/// Prefix of the per-block configuration directive.
pub const CONFIG_PREFIX: &str = "# config";

/// Prefix of the per-segment output path directive.
pub const FILE_PREFIX: &str = "# file:";

/// Overrides carried by a `# config` line. Unset fields fall back to the
/// process-wide defaults for the current unit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Output extension override, without a leading dot
    pub extension: Option<String>,
    /// Whether to split at `---` separators (tri-state: unset keeps default)
    pub separate: Option<bool>,
}

/// Parses a `# config key=value ...` line.
///
/// Returns `None` if the line is not a config directive. Tokens after the
/// two literal prefix words are `key=value` pairs; recognized keys are
/// `ext` and `separate` (`true`/`false`). Unknown keys, malformed tokens
/// and unrecognized `separate` values are silently ignored so future keys
/// stay forward-compatible.
pub fn parse_config_line(line: &str) -> Option<ConfigOverrides> {
    if !line.starts_with(CONFIG_PREFIX) {
        return None;
    }

    let mut tokens = line.split_whitespace();
    // The `#` and `config` literals
    if tokens.next() != Some("#") || tokens.next() != Some("config") {
        return None;
    }

    let mut overrides = ConfigOverrides::default();
    for token in tokens {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        match key {
            "ext" => {
                overrides.extension =
                    Some(crate::config::normalize_extension(value));
            }
            "separate" => match value {
                "true" => overrides.separate = Some(true),
                "false" => overrides.separate = Some(false),
                _ => {}
            },
            _ => {}
        }
    }
    Some(overrides)
}

/// Parses a `# file: <relative-path>` line.
///
/// Returns the trimmed path, or `None` if the line is not a file directive.
/// A directive with an empty path is not a directive at all; the line falls
/// through to ordinary content.
pub fn parse_file_line(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix(FILE_PREFIX)?;
    let path = rest.trim();
    if path.is_empty() { None } else { Some(path) }
}
