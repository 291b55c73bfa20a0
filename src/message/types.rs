//! Message model for conversation dumps
//!
//! Mirrors the serialized form an agent framework produces for its message
//! list. The `type` tag selects the variant, so role filtering is a match.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CostError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum Message {
    System(TextMessage),
    #[serde(alias = "user")]
    Human(TextMessage),
    #[serde(rename = "ai", alias = "assistant")]
    Assistant(AssistantMessage),
    Tool(ToolMessage),
}

/// System and human messages carry the same fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct TextMessage {
    #[serde(default)]
    pub(crate) content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub(crate) additional_kwargs: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct AssistantMessage {
    #[serde(default)]
    pub(crate) content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub(crate) additional_kwargs: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    pub(crate) response_metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct ToolMessage {
    #[serde(default)]
    pub(crate) content: Value,
    #[serde(default)]
    pub(crate) tool_call_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) status: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub(crate) additional_kwargs: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ToolCall {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) args: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
}

/// Token counts reported by the vendor; unknown keys are kept verbatim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct UsageMetadata(pub(crate) Map<String, Value>);

impl UsageMetadata {
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub(crate) fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Read a token count, distinguishing absent keys from malformed values
    pub(crate) fn tokens(&self, key: &str) -> Result<u64, CostError> {
        let value = self.0.get(key).ok_or_else(|| CostError::MissingUsageField {
            key: key.to_string(),
            available: self.keys(),
        })?;
        value.as_u64().ok_or_else(|| CostError::InvalidUsageField {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl AssistantMessage {
    pub(crate) fn model_name(&self) -> Option<&str> {
        self.response_metadata
            .get("model_name")
            .and_then(Value::as_str)
    }
}

impl Message {
    /// Value of the serialized `type` tag
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Message::System(_) => "system",
            Message::Human(_) => "human",
            Message::Assistant(_) => "ai",
            Message::Tool(_) => "tool",
        }
    }

    pub(crate) fn role(&self) -> &'static str {
        match self {
            Message::System(_) => "system",
            Message::Human(_) => "human",
            Message::Assistant(_) => "assistant",
            Message::Tool(_) => "tool",
        }
    }

    pub(crate) fn class_name(&self) -> &'static str {
        match self {
            Message::System(_) => "SystemMessage",
            Message::Human(_) => "HumanMessage",
            Message::Assistant(_) => "AIMessage",
            Message::Tool(_) => "ToolMessage",
        }
    }

    pub(crate) fn content(&self) -> &Value {
        match self {
            Message::System(m) | Message::Human(m) => &m.content,
            Message::Assistant(m) => &m.content,
            Message::Tool(m) => &m.content,
        }
    }

    pub(crate) fn id(&self) -> Option<&str> {
        match self {
            Message::System(m) | Message::Human(m) => m.id.as_deref(),
            Message::Assistant(m) => m.id.as_deref(),
            Message::Tool(m) => m.id.as_deref(),
        }
    }

    pub(crate) fn additional_kwargs(&self) -> &Map<String, Value> {
        match self {
            Message::System(m) | Message::Human(m) => &m.additional_kwargs,
            Message::Assistant(m) => &m.additional_kwargs,
            Message::Tool(m) => &m.additional_kwargs,
        }
    }

    /// Content as display text: strings verbatim, anything else as compact JSON
    pub(crate) fn content_text(&self) -> String {
        match self.content() {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_assistant_with_usage() {
        let msg: Message = serde_json::from_value(json!({
            "type": "ai",
            "content": "hello",
            "usage_metadata": {"input_tokens": 10, "output_tokens": 5, "total_tokens": 15},
            "response_metadata": {"model_name": "gemini-2.5-flash-002"}
        }))
        .unwrap();
        let Message::Assistant(ai) = msg else {
            panic!("expected assistant message");
        };
        assert_eq!(ai.model_name(), Some("gemini-2.5-flash-002"));
        let usage = ai.usage_metadata.unwrap();
        assert_eq!(usage.tokens("input_tokens"), Ok(10));
        assert_eq!(usage.tokens("output_tokens"), Ok(5));
    }

    #[test]
    fn deserialize_role_aliases() {
        let user: Message = serde_json::from_value(json!({"type": "user", "content": "hi"})).unwrap();
        assert!(matches!(user, Message::Human(_)));
        let ai: Message =
            serde_json::from_value(json!({"type": "assistant", "content": "yo"})).unwrap();
        assert!(matches!(ai, Message::Assistant(_)));
    }

    #[test]
    fn deserialize_tool_message() {
        let msg: Message = serde_json::from_value(json!({
            "type": "tool",
            "content": "All tests passed!",
            "tool_call_id": "call_1234",
            "name": "run_tests"
        }))
        .unwrap();
        assert_eq!(msg.kind(), "tool");
        assert_eq!(msg.class_name(), "ToolMessage");
        assert_eq!(msg.content_text(), "All tests passed!");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let res: Result<Message, _> = serde_json::from_value(json!({"type": "function"}));
        assert!(res.is_err());
    }

    #[test]
    fn usage_tokens_missing_key_lists_available() {
        let usage = UsageMetadata(
            json!({"input_tokens": 1, "total_tokens": 1})
                .as_object()
                .cloned()
                .unwrap(),
        );
        let err = usage.tokens("output_tokens").unwrap_err();
        assert_eq!(
            err,
            CostError::MissingUsageField {
                key: "output_tokens".to_string(),
                available: vec!["input_tokens".to_string(), "total_tokens".to_string()],
            }
        );
    }

    #[test]
    fn usage_tokens_rejects_non_integer() {
        let usage = UsageMetadata(json!({"input_tokens": "many"}).as_object().cloned().unwrap());
        assert!(matches!(
            usage.tokens("input_tokens"),
            Err(CostError::InvalidUsageField { .. })
        ));
    }

    #[test]
    fn usage_tokens_rejects_negative_and_fractional_counts() {
        let usage = UsageMetadata(
            json!({"input_tokens": -1, "output_tokens": 1.5})
                .as_object()
                .cloned()
                .unwrap(),
        );
        assert_eq!(
            usage.tokens("input_tokens"),
            Err(CostError::InvalidUsageField {
                key: "input_tokens".to_string(),
                value: "-1".to_string(),
            })
        );
        assert_eq!(
            usage.tokens("output_tokens"),
            Err(CostError::InvalidUsageField {
                key: "output_tokens".to_string(),
                value: "1.5".to_string(),
            })
        );
    }

    #[test]
    fn structured_content_renders_as_json() {
        let msg: Message = serde_json::from_value(json!({
            "type": "human",
            "content": [{"type": "text", "text": "hi"}]
        }))
        .unwrap();
        assert_eq!(msg.content_text(), r#"[{"type":"text","text":"hi"}]"#);
    }

    #[test]
    fn missing_model_name_is_none() {
        let ai = AssistantMessage::default();
        assert_eq!(ai.model_name(), None);
    }
}
