mod describe;
mod loader;
mod types;

pub(crate) use loader::{Conversation, load_conversations};
pub(crate) use types::{AssistantMessage, Message};
#[cfg(test)]
pub(crate) use types::{TextMessage, ToolMessage, UsageMetadata};
