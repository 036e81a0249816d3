//! Switchboard Core - Data Types
//!
//! Pure data types for the multi-agent handoff core: identity types,
//! conversation items, shared session state, tool schemas and
//! outcomes, configuration, and the error taxonomy. All other crates
//! depend on this one; it contains no orchestration logic.

pub mod chat;
pub mod config;
pub mod error;
pub mod identity;
pub mod state;
pub mod tool;

pub use chat::{ConversationItem, Role, RoleParseError, TruncateOptions};
pub use config::SessionConfig;
pub use error::{
    AgentError, BackendError, ConfigError, SummaryError, SwitchboardError, SwitchboardResult,
    ToolError,
};
pub use identity::{AgentName, ItemId, Timestamp};
pub use state::{Profile, SessionState, StateSnapshot};
pub use tool::{ParamSpec, ParamType, RangeConstraint, ToolInvocation, ToolOutcome, ToolSpec};
