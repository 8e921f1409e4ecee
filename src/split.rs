//! The segment splitter: a single pass over rendered output that classifies
//! each line into a tagged event and reduces the event stream into an
//! ordered sequence of [`Segment`]s.
//!
//! A segment closes at a `---` separator line or at end of input, and is
//! emitted only if it accumulated content. Empty segments are dropped
//! silently and consume no ordinal; an explicit `# file:` path attached to
//! a dropped segment is discarded with it.

use crate::directive;
use std::mem;
use std::path::PathBuf;

/// A line whose trimmed content equals this closes the current segment.
pub const SEPARATOR: &str = "---";

/// One contiguous span of rendered content destined for one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Accumulated lines, each newline-terminated
    pub content: String,
    /// Explicit output path from a `# file:` directive, if any
    pub path: Option<PathBuf>,
}

impl Segment {
    fn new(content: String, path: Option<PathBuf>) -> Self {
        Self { content, path }
    }
}

/// Classification of one line of rendered output.
#[derive(Debug, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// Document separator; closes the current segment
    Separator,
    /// `# file:` directive carrying the next output path
    FileDirective(&'a str),
    /// Ordinary content, appended to the current segment
    Content(&'a str),
}

/// Classifies a single line. Lines matching neither directive pattern are
/// content; the splitter never fails on malformed input.
pub fn classify(line: &str) -> LineEvent<'_> {
    if line.trim() == SEPARATOR {
        LineEvent::Separator
    } else if let Some(path) = directive::parse_file_line(line) {
        LineEvent::FileDirective(path)
    } else {
        LineEvent::Content(line)
    }
}

/// Splits rendered text (with any leading config directive already removed)
/// into ordered segments. The ordinal of a segment is its index in the
/// returned sequence: the count of segments actually emitted before it, not
/// the count of separators seen.
pub fn split_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut content = String::new();
    let mut path: Option<PathBuf> = None;

    for line in text.lines() {
        match classify(line) {
            LineEvent::Separator => {
                if content.is_empty() {
                    // Dropped segment; a pending path goes with it
                    path = None;
                } else {
                    segments.push(Segment::new(mem::take(&mut content), path.take()));
                }
            }
            LineEvent::FileDirective(p) => path = Some(PathBuf::from(p)),
            LineEvent::Content(line) => {
                content.push_str(line);
                content.push('\n');
            }
        }
    }

    if !content.is_empty() {
        segments.push(Segment::new(content, path));
    }
    segments
}

/// Treats the whole text as one segment with no explicit path, used when
/// separator splitting is disabled. Separator lines and `# file:` lines
/// pass through as content verbatim.
pub fn single_segment(text: &str) -> Segment {
    let mut content = String::new();
    for line in text.lines() {
        content.push_str(line);
        content.push('\n');
    }
    Segment::new(content, None)
}
