//! Session driver
//!
//! Orchestrates turn-taking for one conversation: receives caller
//! input, asks the active agent's model for a reply, dispatches tool
//! invocations, applies at most one handoff per turn, and narrates the
//! result. All session mutation flows through `&mut self` methods, so
//! the single-writer-per-conversation discipline is enforced by the
//! borrow checker; concurrent conversations each own their own
//! `Session`.

use std::sync::Arc;
use switchboard_agents::{dispatch, transfer_to, AgentDef, AgentRegistry, Handoff};
use switchboard_context::{carry_over, render_snapshot};
use switchboard_core::{
    AgentError, AgentName, BackendError, ConversationItem, Profile, SessionConfig, SessionState,
    SwitchboardResult, ToolOutcome,
};
use switchboard_llm::{
    BackendRegistry, GenerateRequest, LanguageModel, ModelReply, SpeechToText, TextToSpeech,
};
use switchboard_voice::{AudioClip, VoiceId};
use tracing::{debug, info, warn};

/// Session-level voice used when the active agent has no override.
const DEFAULT_VOICE: &str = "echo";

// ============================================================================
// TURN OUTPUT
// ============================================================================

/// What one completed turn produced.
#[derive(Debug, Clone)]
pub struct TurnOutput {
    /// The narrated reply text.
    pub reply: String,
    /// Synthesized narration, when a TTS backend is configured.
    pub audio: Option<AudioClip>,
    /// The handoff applied during this turn, if any.
    pub handoff: Option<Handoff>,
    /// Tool-invocation round trips consumed.
    pub steps: usize,
}

// ============================================================================
// SESSION BUILDER
// ============================================================================

/// Builder for a `Session`.
pub struct SessionBuilder<P: Profile> {
    profile: P,
    agents: Vec<AgentDef<P>>,
    backends: BackendRegistry,
    default_voice: VoiceId,
    config: SessionConfig,
}

impl<P: Profile> SessionBuilder<P> {
    /// Start building a session around a domain profile.
    pub fn new(profile: P) -> Self {
        Self {
            profile,
            agents: Vec::new(),
            backends: BackendRegistry::new(),
            default_voice: VoiceId::new(DEFAULT_VOICE),
            config: SessionConfig::default(),
        }
    }

    /// Add an agent persona. All personas are registered eagerly at
    /// build time and live for the session's duration.
    pub fn with_agent(mut self, def: AgentDef<P>) -> Self {
        self.agents.push(def);
        self
    }

    /// Add several agent personas.
    pub fn with_agents(mut self, defs: impl IntoIterator<Item = AgentDef<P>>) -> Self {
        self.agents.extend(defs);
        self
    }

    /// Set the session's language model.
    pub fn with_llm(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.backends.register_llm(model);
        self
    }

    /// Set the speech-to-text backend.
    pub fn with_stt(mut self, stt: Arc<dyn SpeechToText>) -> Self {
        self.backends.register_stt(stt);
        self
    }

    /// Set the text-to-speech backend.
    pub fn with_tts(mut self, tts: Arc<dyn TextToSpeech>) -> Self {
        self.backends.register_tts(tts);
        self
    }

    /// Set the voice used when the active agent has no override.
    pub fn with_default_voice(mut self, voice: impl Into<VoiceId>) -> Self {
        self.default_voice = voice.into();
        self
    }

    /// Set the session configuration.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate and assemble the session.
    pub fn build(self) -> SwitchboardResult<Session<P>> {
        self.config.validate()?;
        // The model is mandatory; fail at construction, not first turn.
        self.backends.llm()?;

        let mut registry = AgentRegistry::new();
        for def in self.agents {
            registry.register(def)?;
        }

        Ok(Session {
            state: SessionState::new(self.profile),
            registry,
            active: None,
            backends: self.backends,
            default_voice: self.default_voice,
            config: self.config,
        })
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// One conversation: shared state, the agent registry, the active
/// agent, and the external backends.
pub struct Session<P: Profile> {
    state: SessionState<P>,
    registry: AgentRegistry<P>,
    active: Option<AgentName>,
    backends: BackendRegistry,
    default_voice: VoiceId,
    config: SessionConfig,
}

impl<P: Profile> Session<P> {
    /// Start building a session.
    pub fn builder(profile: P) -> SessionBuilder<P> {
        SessionBuilder::new(profile)
    }

    /// The shared session state.
    pub fn state(&self) -> &SessionState<P> {
        &self.state
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The currently active agent, once started.
    pub fn active_agent(&self) -> Option<&AgentName> {
        self.active.as_ref()
    }

    /// An agent's history buffer, for inspection.
    pub fn history(&self, name: &AgentName) -> SwitchboardResult<&[ConversationItem]> {
        Ok(self.registry.get(name)?.history.items())
    }

    /// Activate the first agent and produce its entry announcement.
    pub async fn start(&mut self, initial: impl Into<AgentName>) -> SwitchboardResult<TurnOutput> {
        let initial = initial.into();
        self.registry.ensure(&initial)?;
        self.active = Some(initial.clone());
        let reply = self.activate(&initial).await?;
        self.finish_turn(reply, None, 0).await
    }

    /// Run one turn from caller audio: transcribe, then process text.
    pub async fn push_audio(&mut self, clip: &AudioClip) -> SwitchboardResult<TurnOutput> {
        let stt = self.backends.stt()?;
        let transcript = stt.transcribe(clip).await?;
        debug!(text = %transcript.text, "transcribed caller audio");
        self.push_text(transcript.text).await
    }

    /// Run one turn from caller text.
    ///
    /// The turn runs to completion before this method returns: any
    /// nested tool dispatch, at most one handoff, and the final
    /// narration all happen inside this call.
    pub async fn push_text(&mut self, text: impl Into<String>) -> SwitchboardResult<TurnOutput> {
        let active = self.active.clone().ok_or(AgentError::NotStarted)?;
        self.registry
            .get_mut(&active)?
            .history
            .push(ConversationItem::user(text.into()));
        self.run_turn(active).await
    }

    // ------------------------------------------------------------------
    // Turn loop
    // ------------------------------------------------------------------

    async fn run_turn(&mut self, active: AgentName) -> SwitchboardResult<TurnOutput> {
        let mut steps = 0usize;
        let mut handoff: Option<Handoff> = None;

        let reply = loop {
            let model = self.model_for(&active)?;

            if steps >= self.config.max_tool_steps {
                // The cap guarantees forward progress: stop dispatching
                // and narrate whatever partial result exists.
                warn!(
                    agent = %active,
                    steps,
                    "tool step limit reached, forcing narration"
                );
                let items = self.registry.get(&active)?.history.items().to_vec();
                let text = self.request_narration(&model, items, None).await?;
                self.registry
                    .get_mut(&active)?
                    .history
                    .push(ConversationItem::assistant(text.clone()));
                break text;
            }

            let runtime = self.registry.get(&active)?;
            let request = GenerateRequest::new(
                runtime.history.items().to_vec(),
                runtime.def().tool_specs(),
            )
            .with_parallel_tool_calls(runtime.def().parallel_tool_calls());

            match model.generate(request).await? {
                ModelReply::Narration(text) => {
                    self.registry
                        .get_mut(&active)?
                        .history
                        .push(ConversationItem::assistant(text.clone()));
                    break text;
                }
                ModelReply::ToolCalls(invocations) => {
                    steps += 1;
                    let total = invocations.len();
                    for (index, invocation) in invocations.into_iter().enumerate() {
                        let call = ConversationItem::tool_call(
                            invocation.name.clone(),
                            invocation.args.clone(),
                        );
                        let call_id = call.id();
                        self.registry.get_mut(&active)?.history.push(call);

                        let outcome =
                            dispatch(self.registry.get(&active)?.def(), &invocation, &mut self.state)?;

                        match outcome {
                            ToolOutcome::Narrated(value) => {
                                self.registry
                                    .get_mut(&active)?
                                    .history
                                    .push(ConversationItem::tool_result(call_id, value));
                            }
                            ToolOutcome::Handoff { target, message } => {
                                let record =
                                    transfer_to(&target, &self.registry, &mut self.state, &active)?;
                                self.registry.get_mut(&active)?.history.push(
                                    ConversationItem::tool_result(
                                        call_id,
                                        serde_json::Value::String(message),
                                    ),
                                );
                                if index + 1 < total {
                                    warn!(
                                        dropped = total - index - 1,
                                        "handoff accepted, dropping remaining invocations in batch"
                                    );
                                }
                                handoff = Some(record);
                                break;
                            }
                        }
                    }

                    if let Some(record) = &handoff {
                        let to = record.to.clone();
                        self.active = Some(to.clone());
                        break self.activate(&to).await?;
                    }
                }
            }
        };

        self.finish_turn(reply, handoff, steps).await
    }

    // ------------------------------------------------------------------
    // Entry hook
    // ------------------------------------------------------------------

    /// Run the entry hook for an agent transitioning inactive → active.
    ///
    /// Merges a bounded slice of the previous agent's history (skipped
    /// for realtime models), appends the synthetic state-summary system
    /// message, and produces the entry announcement with tool
    /// invocation disabled. Returns the announcement text, already
    /// committed to the agent's buffer.
    async fn activate(&mut self, name: &AgentName) -> SwitchboardResult<String> {
        let model = self.model_for(name)?;
        info!(agent = %name, "agent activated");

        if let Some(prev) = self.state.previous_agent().cloned() {
            if !model.is_realtime() {
                let source = self.registry.get(&prev)?.history.items().to_vec();
                let target = &mut self.registry.get_mut(name)?.history;
                let appended = carry_over(&source, target, &self.config.carry_over);
                debug!(from = %prev, to = %name, appended, "carried over history");
            }
        }

        let summary = render_snapshot(&self.state.snapshot());
        let system = ConversationItem::system(format!(
            "You are the {name} agent. Current session state:\n{summary}"
        ));
        self.registry.get_mut(name)?.history.push(system);

        let runtime = self.registry.get(name)?;
        let items = runtime.history.items().to_vec();
        let greeting = runtime.def().greeting().map(str::to_string);
        let text = self.request_narration(&model, items, greeting).await?;

        self.registry
            .get_mut(name)?
            .history
            .push(ConversationItem::assistant(text.clone()));
        Ok(text)
    }

    // ------------------------------------------------------------------
    // Backend helpers
    // ------------------------------------------------------------------

    /// Request a reply with tool invocation disabled. A backend that
    /// returns tool calls anyway is inconsistent with its own contract,
    /// which surfaces as an invalid-reply error rather than being
    /// silently reconciled.
    async fn request_narration(
        &self,
        model: &Arc<dyn LanguageModel>,
        items: Vec<ConversationItem>,
        instructions: Option<String>,
    ) -> SwitchboardResult<String> {
        let mut request = GenerateRequest::narration_only(items);
        if let Some(instructions) = instructions {
            request = request.with_instructions(instructions);
        }
        match model.generate(request).await? {
            ModelReply::Narration(text) => Ok(text),
            ModelReply::ToolCalls(_) => Err(BackendError::InvalidReply {
                backend: model.name().to_string(),
                reason: "tool call returned while tool choice was none".to_string(),
            }
            .into()),
        }
    }

    fn model_for(&self, name: &AgentName) -> SwitchboardResult<Arc<dyn LanguageModel>> {
        match self.registry.get(name)?.def().model() {
            Some(model) => Ok(model.clone()),
            None => self.backends.llm(),
        }
    }

    fn voice_for(&self, name: &AgentName) -> SwitchboardResult<VoiceId> {
        Ok(self
            .registry
            .get(name)?
            .def()
            .voice()
            .cloned()
            .unwrap_or_else(|| self.default_voice.clone()))
    }

    async fn finish_turn(
        &self,
        reply: String,
        handoff: Option<Handoff>,
        steps: usize,
    ) -> SwitchboardResult<TurnOutput> {
        let audio = if self.backends.has_tts() {
            let active = self.active.as_ref().ok_or(AgentError::NotStarted)?;
            let voice = self.voice_for(active)?;
            Some(self.backends.tts()?.synthesize(&reply, &voice).await?)
        } else {
            None
        };
        Ok(TurnOutput {
            reply,
            audio,
            handoff,
            steps,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
