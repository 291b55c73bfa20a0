//! Conversation dump loader
//!
//! Accepts a JSON array of messages, an agent result object with a
//! `messages` array, a single message object, or JSONL.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::AppError;

use super::types::Message;

/// Messages read from one input file, in conversation order
#[derive(Debug, Clone)]
pub(crate) struct Conversation {
    pub(crate) source: PathBuf,
    pub(crate) messages: Vec<Message>,
}

impl Conversation {
    pub(crate) fn label(&self) -> String {
        self.source.display().to_string()
    }
}

#[derive(Deserialize)]
struct AgentResult {
    messages: Vec<Message>,
}

/// Expand input arguments into file paths. Existing paths are taken as-is,
/// anything else is treated as a glob pattern that must match something.
pub(crate) fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>, AppError> {
    let mut files = Vec::new();
    for pattern in patterns {
        let direct = PathBuf::from(pattern);
        if direct.is_file() {
            files.push(direct);
            continue;
        }

        let mut matched: Vec<PathBuf> = glob::glob(pattern)?
            .flatten()
            .filter(|p| p.is_file())
            .collect();
        if matched.is_empty() {
            return Err(AppError::NoMatch {
                pattern: pattern.clone(),
            });
        }
        matched.sort();
        debug!(pattern = %pattern, files = matched.len(), "expanded input pattern");
        files.append(&mut matched);
    }
    Ok(files)
}

pub(crate) fn load_conversation(path: &Path) -> Result<Conversation, AppError> {
    let content = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let messages = parse_messages(path, &content)?;
    debug!(path = %path.display(), messages = messages.len(), "loaded conversation");
    Ok(Conversation {
        source: path.to_path_buf(),
        messages,
    })
}

pub(crate) fn load_conversations(patterns: &[String]) -> Result<Vec<Conversation>, AppError> {
    expand_inputs(patterns)?
        .iter()
        .map(|path| load_conversation(path))
        .collect()
}

fn parse_error(path: &Path, line: usize, source: serde_json::Error) -> AppError {
    AppError::Parse {
        path: path.to_path_buf(),
        line,
        source,
    }
}

pub(crate) fn parse_messages(path: &Path, content: &str) -> Result<Vec<Message>, AppError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    // Whole-document forms first; re-parse with the typed target so errors
    // carry the real line number
    let Ok(document) = serde_json::from_str::<Value>(content) else {
        return parse_jsonl(path, content);
    };
    let parsed = match document {
        Value::Array(_) => serde_json::from_str::<Vec<Message>>(content),
        Value::Object(ref map) if map.get("messages").is_some_and(Value::is_array) => {
            serde_json::from_str::<AgentResult>(content).map(|r| r.messages)
        }
        _ => serde_json::from_str::<Message>(content).map(|m| vec![m]),
    };
    parsed.map_err(|e| {
        let line = e.line();
        parse_error(path, line, e)
    })
}

fn parse_jsonl(path: &Path, content: &str) -> Result<Vec<Message>, AppError> {
    let mut messages = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let message =
            serde_json::from_str::<Message>(line).map_err(|e| parse_error(path, idx + 1, e))?;
        messages.push(message);
    }
    Ok(messages)
}
