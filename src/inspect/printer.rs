//! Human-readable views of a message list

use serde_json::Value;

use crate::cli::PrintMode;
use crate::consts::DEFAULT_MAX_DEPTH;
use crate::message::Message;

use super::node::Node;
use super::printable::{CLASS_KEY, to_printable};
use super::truncate::{RULE_WIDTH, render_json_result, to_json_indented, truncate_text};

const PREVIEW_LENGTH: usize = 50;
const JSON_RESULT_MAX_LENGTH: usize = 500;
const JSON_RESULT_MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PrintOptions {
    pub(crate) mode: PrintMode,
    pub(crate) show_metadata: bool,
    pub(crate) show_content: bool,
    pub(crate) max_content_length: Option<usize>,
    /// Unset means the per-mode default: 5 for full, 3 for json
    pub(crate) max_depth: Option<usize>,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            mode: PrintMode::Full,
            show_metadata: true,
            show_content: true,
            max_content_length: None,
            max_depth: None,
        }
    }
}

pub(crate) fn render_messages(messages: &[Message], opts: &PrintOptions) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = format!("\n{heavy}\n{} messages\n{heavy}\n\n", messages.len());

    for (i, msg) in messages.iter().enumerate() {
        let idx = i + 1;
        let block = match opts.mode {
            PrintMode::Summary => render_summary(msg, idx),
            PrintMode::Metadata => render_metadata(msg, idx),
            PrintMode::Content => render_content(msg, idx, opts.max_content_length),
            PrintMode::Full => render_full(msg, idx, opts),
            PrintMode::Json => render_json_result(
                &Node::Object(msg),
                &format!("[{idx}] {}", msg.class_name()),
                opts.max_depth.unwrap_or(JSON_RESULT_MAX_DEPTH),
                Some(opts.max_content_length.unwrap_or(JSON_RESULT_MAX_LENGTH)),
            ),
        };
        out.push_str(&block);
        out.push_str(&format!("{light}\n\n"));
    }
    out
}

fn render_summary(msg: &Message, idx: usize) -> String {
    let preview = truncate_text(&msg.content_text(), PREVIEW_LENGTH);
    format!(
        "[{idx}] {} ({})\n    > {preview}\n",
        msg.role().to_uppercase(),
        msg.kind()
    )
}

fn render_metadata(msg: &Message, idx: usize) -> String {
    let mut out = format!(
        "[{idx}] metadata\n    Type: {}\n    Role: {}\n",
        msg.kind(),
        msg.role()
    );
    if let Some(id) = msg.id() {
        out.push_str(&format!("    ID: {id}\n"));
    }
    let kwargs = msg.additional_kwargs();
    if !kwargs.is_empty() {
        out.push_str(&format!(
            "    Additional kwargs: {}\n",
            Value::Object(kwargs.clone())
        ));
    }
    if let Message::Assistant(ai) = msg {
        if !ai.response_metadata.is_empty() {
            out.push_str(&format!(
                "    Response metadata: {}\n",
                Value::Object(ai.response_metadata.clone())
            ));
        }
        if let Some(usage) = ai.usage_metadata.as_ref().filter(|u| !u.is_empty()) {
            out.push_str(&format!(
                "    Usage: {}\n",
                Value::Object(usage.as_map().clone())
            ));
        }
    }
    out
}

fn render_content(msg: &Message, idx: usize, max_length: Option<usize>) -> String {
    let content = msg.content_text();
    let content = match max_length {
        Some(max) => truncate_text(&content, max),
        None => content,
    };
    format!("[{idx}] {}\n{content}\n", msg.role().to_uppercase())
}

fn render_full(msg: &Message, idx: usize, opts: &PrintOptions) -> String {
    let mut output = serde_json::Map::new();

    if opts.show_content {
        let content = msg.content_text();
        let content = match opts.max_content_length {
            Some(max) => truncate_text(&content, max),
            None => content,
        };
        output.insert("content".to_string(), Value::String(content));
    }

    if opts.show_metadata {
        let mut metadata = to_printable(
            &Node::Object(msg),
            opts.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            0,
        );
        // already shown in the header
        if let Value::Object(map) = &mut metadata {
            map.shift_remove(CLASS_KEY);
        }
        output.insert("metadata".to_string(), metadata);
    }

    format!(
        "index: {idx},\ntype: {}\n{}\n",
        msg.kind().to_uppercase(),
        to_json_indented(&Value::Object(output), 3)
    )
}
