//! Agent definitions
//!
//! Each persona is one `AgentDef`: static instructions, an ordered
//! toolset, and optional per-agent voice and model overrides. Shared
//! behavior (entry hook, truncation) lives in the session driver and
//! context crate rather than in an inheritance chain; a persona is data
//! plus tool handlers, nothing more.

use std::sync::Arc;
use switchboard_core::{AgentName, Profile, ToolSpec};
use switchboard_llm::LanguageModel;
use switchboard_voice::VoiceId;

use crate::tool::ToolDef;

/// Definition of one conversational agent.
pub struct AgentDef<P: Profile> {
    name: AgentName,
    instructions: String,
    tools: Vec<ToolDef<P>>,
    voice: Option<VoiceId>,
    model: Option<Arc<dyn LanguageModel>>,
    parallel_tool_calls: bool,
    greeting: Option<String>,
}

impl<P: Profile> AgentDef<P> {
    /// Create an agent with the given registry name and instructions.
    pub fn new(name: impl Into<AgentName>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            tools: Vec::new(),
            voice: None,
            model: None,
            parallel_tool_calls: true,
            greeting: None,
        }
    }

    /// Add a tool operation.
    pub fn with_tool(mut self, tool: ToolDef<P>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Add several tool operations.
    pub fn with_tools(mut self, tools: impl IntoIterator<Item = ToolDef<P>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Give this agent its own synthesis voice.
    pub fn with_voice(mut self, voice: impl Into<VoiceId>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Give this agent its own language model.
    pub fn with_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Control whether the model may batch tool invocations. Router
    /// agents whose tools are all handoffs disable this so exactly one
    /// transfer wins.
    pub fn with_parallel_tool_calls(mut self, allowed: bool) -> Self {
        self.parallel_tool_calls = allowed;
        self
    }

    /// Scripted instruction for the entry announcement.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// The agent's registry name.
    pub fn name(&self) -> &AgentName {
        &self.name
    }

    /// The agent's instruction text.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Per-agent voice override, if any.
    pub fn voice(&self) -> Option<&VoiceId> {
        self.voice.as_ref()
    }

    /// Per-agent model override, if any.
    pub fn model(&self) -> Option<&Arc<dyn LanguageModel>> {
        self.model.as_ref()
    }

    /// Whether batched tool invocations are allowed.
    pub fn parallel_tool_calls(&self) -> bool {
        self.parallel_tool_calls
    }

    /// Entry-announcement instruction, if any.
    pub fn greeting(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    /// The agent's tools.
    pub fn tools(&self) -> &[ToolDef<P>] {
        &self.tools
    }

    /// Schemas for every exposed tool, in declaration order. This is
    /// what gets published to the model backend.
    pub fn tool_specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec().clone()).collect()
    }

    /// Find a tool by name.
    pub fn find_tool(&self, name: &str) -> Option<&ToolDef<P>> {
        self.tools.iter().find(|t| t.name() == name)
    }
}

impl<P: Profile> std::fmt::Debug for AgentDef<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentDef")
            .field("name", &self.name)
            .field("tools", &self.tools.len())
            .field("voice", &self.voice)
            .field("parallel_tool_calls", &self.parallel_tool_calls)
            .finish()
    }
}
