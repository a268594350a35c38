//! Indentation math for embedding blocks as YAML block scalars.
//!
//! A block pasted under `  foo: ` must be indented one key level deeper
//! than the line it anchors to, or the document stops being valid YAML.
//! `compute_indent` derives that depth from the anchoring line,
//! `pad`/`unpad` apply and strip it.

/// Number of spaces one YAML key level is deeper than its parent.
const KEY_INDENT: usize = 2;

/// Compute the indentation needed to nest a block under `context_line`.
///
/// - first character non-space → the block nests 2 columns in
/// - leading run of spaces ending at index `i` → `i + 2`
/// - all-space or empty line → index of the last character scanned
///   (degenerate, effectively "keep it where it is")
///
/// ```
/// use yamlvault::text::compute_indent;
///
/// assert_eq!(compute_indent("foo: bar"), 2);
/// assert_eq!(compute_indent("  foo: bar"), 4);
/// ```
pub fn compute_indent(context_line: &str) -> usize {
    let mut prev_was_space = false;
    let mut padding = 0;

    for (i, c) in context_line.chars().enumerate() {
        if i == 0 && c != ' ' {
            return KEY_INDENT;
        }
        if prev_was_space && c != ' ' {
            return i + KEY_INDENT;
        }
        prev_was_space = c == ' ';
        padding = i;
    }

    padding
}

/// Prefix every non-empty line of `text` with `padding` spaces.
///
/// Empty lines are left untouched so no trailing whitespace is
/// introduced; line terminators are preserved positionally. Padding of
/// zero returns the text unchanged.
pub fn pad(text: &str, padding: usize) -> String {
    if padding == 0 {
        return text.to_string();
    }

    let prefix = " ".repeat(padding);
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip all leading whitespace from every line of `text`.
///
/// Line terminators are preserved. For any non-negative `p`,
/// `unpad(pad(t, p)) == unpad(t)`.
pub fn unpad(text: &str) -> String {
    text.split('\n')
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n")
}
