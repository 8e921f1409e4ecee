//! Default file naming for segments that carry no explicit `# file:` path.

/// Computes the file name for the segment at `ordinal`.
///
/// Ordinal 0 yields `{prefix}` or `{prefix}.{extension}`; later ordinals
/// append a zero-padded `-NN` suffix. Padding is a minimum width of two,
/// so ordinals of 100 and above render unchanged.
pub fn output_file_name(extension: &str, prefix: &str, ordinal: usize) -> String {
    let base = if ordinal > 0 {
        format!("{prefix}-{ordinal:02}")
    } else {
        prefix.to_string()
    };

    if extension.is_empty() {
        base
    } else {
        format!("{base}.{extension}")
    }
}
