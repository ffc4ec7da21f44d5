//! Doc-comment recovery from raw GraphQL source text.
//!
//! GraphQL `#` comments never reach the AST, so descriptions written as
//! comments above an operation or variable have to be fished out of the
//! source by byte offset. This is a deliberately textual heuristic: it scans
//! only the slice between a node's start and its previous sibling's end, so
//! an unrelated comment further up can never be captured. It knows nothing
//! about the grammar beyond GraphQL's two comment syntaxes.

/// Recovers a doc comment for the node starting at `node_start`.
///
/// Scans `source[lower_bound..node_start]` for, in priority order, a
/// single-line `#` comment running to the end of the slice, then a
/// `"""block"""` ending at the slice end. Markers are stripped and the text
/// trimmed; returns `None` when no comment is found or it is empty.
pub(crate) fn description_between(
    source: &str,
    node_start: Option<usize>,
    lower_bound: usize,
) -> Option<String> {
    let node_start = node_start?;
    let slice = source.get(lower_bound..node_start)?;
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }

    // A `#` comment must sit on the last line of the slice, i.e. directly
    // above the node with nothing but whitespace in between.
    let last_line = trimmed.rsplit('\n').next().unwrap_or(trimmed);
    if let Some(pos) = last_line.find('#') {
        let text = last_line[pos + 1..].trim();
        return (!text.is_empty()).then(|| text.to_string());
    }

    // Otherwise a block comment closing at the slice end.
    if let Some(before_close) = trimmed.strip_suffix("\"\"\"") {
        if let Some(open) = before_close.rfind("\"\"\"") {
            let text = before_close[open + 3..].trim();
            return (!text.is_empty()).then(|| text.to_string());
        }
    }

    None
}
