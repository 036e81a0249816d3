//! Switchboard Agents - Personas, Tools, and Handoff
//!
//! Agent definitions built by composition: instructions, an ordered
//! toolset with introspectable schemas, and optional voice/model
//! overrides. The registry holds every persona for the session's
//! lifetime; the handoff controller swaps control between them.

pub mod agent;
pub mod handoff;
pub mod registry;
pub mod tool;

pub use agent::AgentDef;
pub use handoff::{transfer_to, Handoff};
pub use registry::{AgentRegistry, AgentRuntime};
pub use tool::{decode_args, dispatch, ToolCtx, ToolDef};
