//! Switchboard LLM - Language-Model Backend Traits
//!
//! The trait boundary between the handoff core and whatever model
//! service generates replies. A backend receives the active agent's
//! history plus the enabled tool schemas and answers with either a
//! narration or a batch of tool-invocation requests. The capability
//! flag `is_realtime` distinguishes realtime/streaming models, for
//! which entry-hook history carry-over is skipped.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use switchboard_core::{
    BackendError, ConversationItem, SwitchboardResult, ToolInvocation, ToolSpec,
};
use tracing::debug;

// Re-exported so embedders can name every backend trait from one crate.
pub use switchboard_voice::{SpeechToText, TextToSpeech};

// ============================================================================
// REQUEST / REPLY TYPES
// ============================================================================

/// Whether the model may invoke tools in this reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// The model decides whether to invoke tools.
    Auto,
    /// Tool invocation is disabled for this reply; the model must
    /// narrate. Entry announcements use this.
    None,
}

/// One generation request to the model backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Conversation history, oldest first.
    pub items: Vec<ConversationItem>,
    /// Schemas of the tools the active agent exposes. Empty when tools
    /// are disabled.
    pub tools: Vec<ToolSpec>,
    /// Tool-invocation control for this reply.
    pub tool_choice: ToolChoice,
    /// Per-reply instruction (e.g. a scripted greeting), if any.
    pub instructions: Option<String>,
    /// Whether the model may batch several invocations in one reply.
    /// Router-style agents disable this so a single handoff wins.
    pub parallel_tool_calls: bool,
}

impl GenerateRequest {
    /// A tools-enabled request over the given history and schemas.
    pub fn new(items: Vec<ConversationItem>, tools: Vec<ToolSpec>) -> Self {
        Self {
            items,
            tools,
            tool_choice: ToolChoice::Auto,
            instructions: None,
            parallel_tool_calls: true,
        }
    }

    /// A narration-only request (tools disabled).
    pub fn narration_only(items: Vec<ConversationItem>) -> Self {
        Self {
            items,
            tools: Vec::new(),
            tool_choice: ToolChoice::None,
            instructions: None,
            parallel_tool_calls: true,
        }
    }

    /// Attach a per-reply instruction.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Control invocation batching.
    pub fn with_parallel_tool_calls(mut self, allowed: bool) -> Self {
        self.parallel_tool_calls = allowed;
        self
    }
}

/// Reply from the model backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelReply {
    /// A narrated reply to speak to the caller.
    Narration(String),
    /// One or more tool-invocation requests.
    ToolCalls(Vec<ToolInvocation>),
}

// ============================================================================
// LANGUAGE MODEL TRAIT
// ============================================================================

/// A language-model backend.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Backend name for diagnostics.
    fn name(&self) -> &str;

    /// Whether this is a realtime/streaming model. Realtime models
    /// manage their own context window, so the entry hook skips history
    /// carry-over for them.
    fn is_realtime(&self) -> bool {
        false
    }

    /// Generate one reply.
    async fn generate(&self, request: GenerateRequest) -> SwitchboardResult<ModelReply>;
}

// ============================================================================
// BACKEND REGISTRY
// ============================================================================

/// Registry of the external backends one session talks to.
///
/// The language model is mandatory; speech backends are optional (a
/// text-only session works without them). Accessors return typed
/// not-configured errors rather than panicking.
#[derive(Default)]
pub struct BackendRegistry {
    llm: Option<Arc<dyn LanguageModel>>,
    stt: Option<Arc<dyn SpeechToText>>,
    tts: Option<Arc<dyn TextToSpeech>>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the language model.
    pub fn register_llm(&mut self, model: Arc<dyn LanguageModel>) {
        debug!(model = model.name(), "registered language model");
        self.llm = Some(model);
    }

    /// Register the speech-to-text backend.
    pub fn register_stt(&mut self, stt: Arc<dyn SpeechToText>) {
        debug!(backend = stt.name(), "registered speech-to-text");
        self.stt = Some(stt);
    }

    /// Register the text-to-speech backend.
    pub fn register_tts(&mut self, tts: Arc<dyn TextToSpeech>) {
        debug!(backend = tts.name(), "registered text-to-speech");
        self.tts = Some(tts);
    }

    /// The language model, or a not-configured error.
    pub fn llm(&self) -> SwitchboardResult<Arc<dyn LanguageModel>> {
        self.llm
            .clone()
            .ok_or_else(|| BackendError::ModelNotConfigured.into())
    }

    /// The speech-to-text backend, or a not-configured error.
    pub fn stt(&self) -> SwitchboardResult<Arc<dyn SpeechToText>> {
        self.stt
            .clone()
            .ok_or_else(|| BackendError::SttNotConfigured.into())
    }

    /// The text-to-speech backend, or a not-configured error.
    pub fn tts(&self) -> SwitchboardResult<Arc<dyn TextToSpeech>> {
        self.tts
            .clone()
            .ok_or_else(|| BackendError::TtsNotConfigured.into())
    }

    /// Whether a text-to-speech backend is configured.
    pub fn has_tts(&self) -> bool {
        self.tts.is_some()
    }
}

// ============================================================================
// MOCK LANGUAGE MODEL
// ============================================================================

/// Scripted mock model for tests and demos.
///
/// Tools-enabled requests pop the next scripted reply; once the script
/// runs dry they fall back to a fixed narration. Requests with
/// `ToolChoice::None` always answer with the fallback narration and do
/// not consume the script, mirroring a real model that cannot invoke
/// tools when they are disabled. Every request is recorded for
/// inspection.
pub struct MockLanguageModel {
    name: String,
    realtime: bool,
    fallback: String,
    script: Mutex<VecDeque<ModelReply>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockLanguageModel {
    /// A mock with an empty script.
    pub fn new() -> Self {
        Self {
            name: "mock-llm".to_string(),
            realtime: false,
            fallback: "Understood.".to_string(),
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A mock primed with scripted replies.
    pub fn scripted(replies: impl IntoIterator<Item = ModelReply>) -> Self {
        let mock = Self::new();
        mock.script
            .lock()
            .expect("mock lock poisoned")
            .extend(replies);
        mock
    }

    /// Mark the mock as a realtime model.
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Override the fallback narration.
    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = text.into();
        self
    }

    /// Append a reply to the script.
    pub fn push_reply(&self, reply: ModelReply) {
        self.script.lock().expect("mock lock poisoned").push_back(reply);
    }

    /// Every request seen so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    /// Number of scripted replies not yet consumed.
    pub fn remaining_script(&self) -> usize {
        self.script.lock().expect("mock lock poisoned").len()
    }
}

impl Default for MockLanguageModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_realtime(&self) -> bool {
        self.realtime
    }

    async fn generate(&self, request: GenerateRequest) -> SwitchboardResult<ModelReply> {
        let choice = request.tool_choice;
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(request);

        if choice == ToolChoice::None {
            return Ok(ModelReply::Narration(self.fallback.clone()));
        }

        let next = self.script.lock().expect("mock lock poisoned").pop_front();
        Ok(next.unwrap_or_else(|| ModelReply::Narration(self.fallback.clone())))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_pops_script_in_order() {
        let mock = MockLanguageModel::scripted([
            ModelReply::Narration("first".to_string()),
            ModelReply::Narration("second".to_string()),
        ]);
        let req = GenerateRequest::new(Vec::new(), Vec::new());
        assert_eq!(
            mock.generate(req.clone()).await.unwrap(),
            ModelReply::Narration("first".to_string())
        );
        assert_eq!(
            mock.generate(req).await.unwrap(),
            ModelReply::Narration("second".to_string())
        );
        assert_eq!(mock.remaining_script(), 0);
    }

    #[tokio::test]
    async fn test_mock_falls_back_when_script_dry() {
        let mock = MockLanguageModel::new().with_fallback("done here");
        let reply = mock
            .generate(GenerateRequest::new(Vec::new(), Vec::new()))
            .await
            .unwrap();
        assert_eq!(reply, ModelReply::Narration("done here".to_string()));
    }

    #[tokio::test]
    async fn test_tools_disabled_does_not_consume_script() {
        let mock = MockLanguageModel::scripted([ModelReply::ToolCalls(vec![
            ToolInvocation::new("lookup", json!({})),
        ])]);
        let reply = mock
            .generate(GenerateRequest::narration_only(Vec::new()))
            .await
            .unwrap();
        assert!(matches!(reply, ModelReply::Narration(_)));
        assert_eq!(mock.remaining_script(), 1);
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = MockLanguageModel::new();
        let req = GenerateRequest::new(
            vec![ConversationItem::user("hello")],
            Vec::new(),
        )
        .with_parallel_tool_calls(false);
        mock.generate(req).await.unwrap();
        let seen = mock.requests();
        assert_eq!(seen.len(), 1);
        assert!(!seen[0].parallel_tool_calls);
    }

    #[test]
    fn test_registry_not_configured_errors() {
        let registry = BackendRegistry::new();
        assert!(registry.llm().is_err());
        assert!(registry.stt().is_err());
        assert!(registry.tts().is_err());
        assert!(!registry.has_tts());
    }

    #[test]
    fn test_registry_returns_registered_model() {
        let mut registry = BackendRegistry::new();
        registry.register_llm(Arc::new(MockLanguageModel::new()));
        assert_eq!(registry.llm().unwrap().name(), "mock-llm");
    }
}
