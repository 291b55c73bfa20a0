//! Display helpers: indented JSON and per-line truncation

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::node::Node;
use super::printable::to_printable;

pub(super) const RULE_WIDTH: usize = 80;

/// Characters kept after the ellipsis so truncated output stays balanced
const CLOSERS: [char; 5] = [',', '{', '[', '}', ']'];

/// Cut `text` to `max_len` characters, appending `...` when shortened
pub(super) fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let head: String = text.chars().take(max_len).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Truncate every line longer than `max_len` characters.
///
/// A cut line ends with `..."`; when the input line ended with a comma,
/// bracket or brace, that character follows after a space.
pub(super) fn truncate_lines(text: &str, max_len: usize) -> String {
    text.split('\n')
        .map(|line| {
            if line.chars().count() <= max_len {
                return line.to_string();
            }
            let head: String = line.chars().take(max_len).collect();
            match line.trim_end().chars().last() {
                Some(last) if CLOSERS.contains(&last) => format!("{head}...\" {last}"),
                _ => format!("{head}...\""),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-print JSON with the given indent width
pub(super) fn to_json_indented(value: &Value, indent: usize) -> String {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => value.to_string(),
    }
}

/// Banner, printable JSON of `value`, and closing rule
pub(super) fn render_json_result(
    value: &Node<'_>,
    title: &str,
    max_depth: usize,
    max_content_length: Option<usize>,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let printable = to_printable(value, max_depth, 0);
    let mut json = to_json_indented(&printable, 2);
    if let Some(max_len) = max_content_length {
        json = truncate_lines(&json, max_len);
    }
    format!("\n{rule}\n{title}\n{rule}\n\n{json}\n\n{rule}\n\n")
}
