use crate::inspect::{Describable, Node};

use super::types::{AssistantMessage, Message, TextMessage, ToolCall, ToolMessage};

impl Describable for Message {
    fn type_name(&self) -> &'static str {
        self.class_name()
    }

    fn fields(&self) -> Vec<(&'static str, Node<'_>)> {
        let mut fields = vec![("type", Node::Str(self.kind()))];
        match self {
            Message::System(m) | Message::Human(m) => fields.extend(m.fields()),
            Message::Assistant(m) => fields.extend(m.fields()),
            Message::Tool(m) => fields.extend(m.fields()),
        }
        fields
    }

    fn repr(&self) -> String {
        format!("{}(content={:?})", self.class_name(), self.content_text())
    }
}

impl Describable for TextMessage {
    fn type_name(&self) -> &'static str {
        "TextMessage"
    }

    fn fields(&self) -> Vec<(&'static str, Node<'_>)> {
        vec![
            ("content", Node::Json(&self.content)),
            ("additional_kwargs", Node::map(&self.additional_kwargs)),
            ("name", Node::opt_str(self.name.as_deref())),
            ("id", Node::opt_str(self.id.as_deref())),
        ]
    }
}

impl Describable for AssistantMessage {
    fn type_name(&self) -> &'static str {
        "AIMessage"
    }

    fn fields(&self) -> Vec<(&'static str, Node<'_>)> {
        vec![
            ("content", Node::Json(&self.content)),
            ("additional_kwargs", Node::map(&self.additional_kwargs)),
            ("response_metadata", Node::map(&self.response_metadata)),
            ("name", Node::opt_str(self.name.as_deref())),
            ("id", Node::opt_str(self.id.as_deref())),
            ("tool_calls", Node::list(self.tool_calls.as_slice())),
            (
                "usage_metadata",
                self.usage_metadata
                    .as_ref()
                    .map_or(Node::Null, |u| Node::map(u.as_map())),
            ),
        ]
    }
}

impl Describable for ToolMessage {
    fn type_name(&self) -> &'static str {
        "ToolMessage"
    }

    fn fields(&self) -> Vec<(&'static str, Node<'_>)> {
        vec![
            ("content", Node::Json(&self.content)),
            ("additional_kwargs", Node::map(&self.additional_kwargs)),
            ("name", Node::opt_str(self.name.as_deref())),
            ("id", Node::opt_str(self.id.as_deref())),
            ("tool_call_id", Node::Str(&self.tool_call_id)),
            ("status", Node::opt_str(self.status.as_deref())),
        ]
    }
}

impl Describable for ToolCall {
    fn type_name(&self) -> &'static str {
        "ToolCall"
    }

    fn fields(&self) -> Vec<(&'static str, Node<'_>)> {
        vec![
            ("name", Node::Str(&self.name)),
            ("args", Node::Json(&self.args)),
            ("id", Node::opt_str(self.id.as_deref())),
        ]
    }
}
