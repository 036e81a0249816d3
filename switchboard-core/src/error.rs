//! Error types for Switchboard operations
//!
//! The taxonomy follows the handoff core's failure policy: unknown
//! agents and tools are configuration errors that surface loudly to the
//! embedder; missing user-supplied data is never an error (tools narrate
//! guidance instead); backend failures propagate without leaving the
//! session state partially mutated.

use thiserror::Error;

/// Agent registry and handoff errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("Unknown agent: `{name}` is not registered in this session")]
    UnknownAgent { name: String },

    #[error("Agent `{name}` is already registered")]
    DuplicateAgent { name: String },

    #[error("Session has no active agent; call start() first")]
    NotStarted,
}

/// Tool dispatch errors.
///
/// These cover backend/configuration inconsistencies only. A tool whose
/// domain preconditions are unmet returns a narrated guidance string,
/// not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: `{tool}` is not exposed by agent `{agent}`")]
    UnknownTool { agent: String, tool: String },

    #[error("Invalid arguments for `{tool}`: {reason}")]
    InvalidArgs { tool: String, reason: String },

    #[error("Tool `{tool}` failed: {reason}")]
    HandlerFailed { tool: String, reason: String },
}

/// External backend errors (language model, speech services).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("No language model configured")]
    ModelNotConfigured,

    #[error("No speech-to-text backend configured")]
    SttNotConfigured,

    #[error("No text-to-speech backend configured")]
    TtsNotConfigured,

    #[error("Request to {backend} failed: {reason}")]
    RequestFailed { backend: String, reason: String },

    #[error("Invalid reply from {backend}: {reason}")]
    InvalidReply { backend: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// State-summary parse errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SummaryError {
    #[error("Malformed summary line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

/// Master error type for all Switchboard errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SwitchboardError {
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    #[error("Session task terminated")]
    SessionClosed,
}

/// Result type alias for Switchboard operations.
pub type SwitchboardResult<T> = Result<T, SwitchboardError>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_error_display_unknown() {
        let err = AgentError::UnknownAgent {
            name: "mortgage".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Unknown agent"));
        assert!(msg.contains("mortgage"));
    }

    #[test]
    fn test_tool_error_display_invalid_args() {
        let err = ToolError::InvalidArgs {
            tool: "process_refund".to_string(),
            reason: "amount must be a number".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("process_refund"));
        assert!(msg.contains("amount must be a number"));
    }

    #[test]
    fn test_backend_error_display_invalid_reply() {
        let err = BackendError::InvalidReply {
            backend: "mock-llm".to_string(),
            reason: "tool call returned while tools were disabled".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("mock-llm"));
        assert!(msg.contains("disabled"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            field: "max_tool_steps".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("max_tool_steps"));
        assert!(msg.contains("at least 1"));
    }

    #[test]
    fn test_master_error_from_variants() {
        let agent = SwitchboardError::from(AgentError::NotStarted);
        assert!(matches!(agent, SwitchboardError::Agent(_)));

        let tool = SwitchboardError::from(ToolError::UnknownTool {
            agent: "initial".to_string(),
            tool: "warp".to_string(),
        });
        assert!(matches!(tool, SwitchboardError::Tool(_)));

        let backend = SwitchboardError::from(BackendError::ModelNotConfigured);
        assert!(matches!(backend, SwitchboardError::Backend(_)));

        let summary = SwitchboardError::from(SummaryError::MalformedLine {
            line: 3,
            reason: "no separator".to_string(),
        });
        assert!(matches!(summary, SwitchboardError::Summary(_)));
    }
}
