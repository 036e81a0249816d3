//! Tool descriptors and dispatch
//!
//! A tool couples its introspectable schema with a handler closure.
//! Handlers mutate session state through a staged copy: the dispatcher
//! clones the state, runs the handler against the clone, and commits
//! only on success, so a failing tool operation changes nothing.

use serde_json::Value;
use std::fmt;
use switchboard_core::{
    AgentName, Profile, SessionState, ToolError, ToolInvocation, ToolOutcome, ToolSpec,
};
use tracing::debug;

use crate::agent::AgentDef;

// ============================================================================
// TOOL CONTEXT
// ============================================================================

/// Context handed to a tool handler.
pub struct ToolCtx<'a, P: Profile> {
    /// Staged session state; committed by the dispatcher on success.
    pub state: &'a mut SessionState<P>,
    /// Name of the agent whose tool is running.
    pub agent: &'a AgentName,
}

// ============================================================================
// TOOL DEFINITION
// ============================================================================

type Handler<P> = dyn Fn(Value, &mut ToolCtx<'_, P>) -> Result<ToolOutcome, ToolError> + Send + Sync;

/// One tool operation: schema plus handler.
pub struct ToolDef<P: Profile> {
    spec: ToolSpec,
    handler: Box<Handler<P>>,
}

impl<P: Profile> ToolDef<P> {
    /// Create a tool from its schema and handler.
    pub fn new(
        spec: ToolSpec,
        handler: impl Fn(Value, &mut ToolCtx<'_, P>) -> Result<ToolOutcome, ToolError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            spec,
            handler: Box::new(handler),
        }
    }

    /// The tool's schema.
    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    /// The tool's name.
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Validate arguments against the schema, apply declared defaults,
    /// and run the handler.
    pub fn invoke(
        &self,
        args: Value,
        ctx: &mut ToolCtx<'_, P>,
    ) -> Result<ToolOutcome, ToolError> {
        self.spec.validate_args(&args)?;
        (self.handler)(self.apply_defaults(args), ctx)
    }

    /// Fill absent parameters that declare a default value.
    fn apply_defaults(&self, args: Value) -> Value {
        let mut object = match args {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        for param in &self.spec.params {
            if let Some(default) = &param.default {
                let missing = !matches!(object.get(&param.name), Some(v) if !v.is_null());
                if missing {
                    object.insert(param.name.clone(), default.clone());
                }
            }
        }
        Value::Object(object)
    }
}

impl<P: Profile> fmt::Debug for ToolDef<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDef").field("spec", &self.spec).finish()
    }
}

// ============================================================================
// ARGUMENT DECODING
// ============================================================================

/// Decode a validated argument object into a typed struct.
///
/// Handlers pair this with a per-tool `Deserialize` struct so field
/// access is typed; schema validation has already run by the time a
/// handler sees the arguments.
pub fn decode_args<T: serde::de::DeserializeOwned>(
    tool: &str,
    args: &Value,
) -> Result<T, ToolError> {
    serde_json::from_value(args.clone()).map_err(|e| ToolError::InvalidArgs {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Dispatch one invocation against an agent's toolset.
///
/// Unknown tools are a configuration error: the backend asked for a
/// capability the active agent does not expose. State changes are
/// atomic; on any error the caller's state is untouched.
pub fn dispatch<P: Profile>(
    agent: &AgentDef<P>,
    invocation: &ToolInvocation,
    state: &mut SessionState<P>,
) -> Result<ToolOutcome, ToolError> {
    let tool = agent
        .find_tool(&invocation.name)
        .ok_or_else(|| ToolError::UnknownTool {
            agent: agent.name().to_string(),
            tool: invocation.name.clone(),
        })?;

    debug!(agent = %agent.name(), tool = tool.name(), "dispatching tool");

    let mut staged = state.clone();
    let outcome = {
        let mut ctx = ToolCtx {
            state: &mut staged,
            agent: agent.name(),
        };
        tool.invoke(invocation.args.clone(), &mut ctx)?
    };
    *state = staged;
    Ok(outcome)
}

// ============================================================================
// TESTS
// ============================================================================
