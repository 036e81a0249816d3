//! Conversation item types
//!
//! A conversation is an ordered, append-only sequence of items: plain
//! messages, tool invocations requested by the model, and the results
//! those invocations produced. Tool results carry JSON values rather
//! than bare strings so structured payloads survive the round trip to
//! the model backend.

use crate::identity::ItemId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// ROLES
// ============================================================================

/// Role of a message in conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Convert to wire string representation.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Parse from wire string representation.
    pub fn from_wire_str(s: &str) -> Result<Self, RoleParseError> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

/// Error when parsing an invalid role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleParseError(pub String);

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid role: {}", self.0)
    }
}

impl std::error::Error for RoleParseError {}

// ============================================================================
// CONVERSATION ITEMS
// ============================================================================

/// One item of a conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationItem {
    /// A plain chat message.
    Message {
        id: ItemId,
        role: Role,
        content: String,
    },
    /// A tool invocation requested by the model.
    ToolCall {
        id: ItemId,
        name: String,
        args: Value,
    },
    /// The result of a tool invocation, paired to its call by `call_id`.
    ToolResult {
        id: ItemId,
        call_id: ItemId,
        value: Value,
    },
}

impl ConversationItem {
    /// Create a system message with a fresh id.
    pub fn system(content: impl Into<String>) -> Self {
        Self::message(Role::System, content)
    }

    /// Create a user message with a fresh id.
    pub fn user(content: impl Into<String>) -> Self {
        Self::message(Role::User, content)
    }

    /// Create an assistant message with a fresh id.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::message(Role::Assistant, content)
    }

    /// Create a message with the given role and a fresh id.
    pub fn message(role: Role, content: impl Into<String>) -> Self {
        ConversationItem::Message {
            id: ItemId::generate(),
            role,
            content: content.into(),
        }
    }

    /// Create a tool-call item with a fresh id.
    pub fn tool_call(name: impl Into<String>, args: Value) -> Self {
        ConversationItem::ToolCall {
            id: ItemId::generate(),
            name: name.into(),
            args,
        }
    }

    /// Create a tool-result item paired to `call_id`.
    pub fn tool_result(call_id: ItemId, value: Value) -> Self {
        ConversationItem::ToolResult {
            id: ItemId::generate(),
            call_id,
            value,
        }
    }

    /// The item's id.
    pub fn id(&self) -> ItemId {
        match self {
            ConversationItem::Message { id, .. } => *id,
            ConversationItem::ToolCall { id, .. } => *id,
            ConversationItem::ToolResult { id, .. } => *id,
        }
    }

    /// Whether this is a tool call or tool result.
    pub fn is_tool_item(&self) -> bool {
        matches!(
            self,
            ConversationItem::ToolCall { .. } | ConversationItem::ToolResult { .. }
        )
    }

    /// Whether this is a system-role message.
    pub fn is_system_message(&self) -> bool {
        matches!(
            self,
            ConversationItem::Message {
                role: Role::System,
                ..
            }
        )
    }

    /// Message content, if this is a message.
    pub fn content(&self) -> Option<&str> {
        match self {
            ConversationItem::Message { content, .. } => Some(content),
            _ => None,
        }
    }
}

// ============================================================================
// TRUNCATION OPTIONS
// ============================================================================

/// Options controlling bounded, filtered truncation of a history slice.
///
/// The defaults describe the plain truncation contract; carry-over call
/// sites enable `keep_tool_items` so call/result pairs survive an agent
/// handoff intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncateOptions {
    /// Number of eligible items to keep, counted from the most recent.
    pub keep_last_n: usize,
    /// Keep system-role messages.
    pub keep_system_messages: bool,
    /// Keep tool calls and tool results.
    pub keep_tool_items: bool,
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self {
            keep_last_n: 6,
            keep_system_messages: false,
            keep_tool_items: false,
        }
    }
}

impl TruncateOptions {
    /// Options used when porting history across a handoff: tool items
    /// are kept so no call/result pair is split at the boundary.
    pub fn carry_over() -> Self {
        Self {
            keep_tool_items: true,
            ..Self::default()
        }
    }

    /// Override the number of items kept.
    pub fn with_keep_last_n(mut self, n: usize) -> Self {
        self.keep_last_n = n;
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================
