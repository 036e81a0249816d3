//! Mock speech backends for testing
//!
//! Both mocks treat clip bytes as UTF-8 text so tests can assert on
//! content without real audio. The TTS mock records every synthesis
//! request for inspection.

use crate::stt::SpeechToText;
use crate::tts::TextToSpeech;
use crate::types::{AudioClip, Transcript, VoiceId};
use async_trait::async_trait;
use std::sync::Mutex;
use switchboard_core::{BackendError, SwitchboardResult};
use tracing::debug;

/// Mock STT that decodes clip bytes as UTF-8.
#[derive(Debug, Default)]
pub struct MockSpeechToText;

impl MockSpeechToText {
    /// Create the mock.
    pub fn new() -> Self {
        Self
    }

    /// Build a clip whose "audio" is the given text, for driving the
    /// mock from tests.
    pub fn clip_for(text: &str) -> AudioClip {
        AudioClip::new(text.as_bytes().to_vec())
    }
}

#[async_trait]
impl SpeechToText for MockSpeechToText {
    fn name(&self) -> &str {
        "mock-stt"
    }

    async fn transcribe(&self, audio: &AudioClip) -> SwitchboardResult<Transcript> {
        let text = String::from_utf8(audio.data.clone()).map_err(|e| {
            BackendError::RequestFailed {
                backend: self.name().to_string(),
                reason: format!("clip is not UTF-8: {e}"),
            }
        })?;
        debug!(len = text.len(), "mock transcription");
        Ok(Transcript::new(text))
    }
}

/// One recorded synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenLine {
    pub text: String,
    pub voice: VoiceId,
}

/// Mock TTS that echoes text bytes back as the clip and records every
/// request.
#[derive(Debug, Default)]
pub struct MockTextToSpeech {
    spoken: Mutex<Vec<SpokenLine>>,
}

impl MockTextToSpeech {
    /// Create the mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every synthesis request seen so far.
    pub fn spoken(&self) -> Vec<SpokenLine> {
        self.spoken.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl TextToSpeech for MockTextToSpeech {
    fn name(&self) -> &str {
        "mock-tts"
    }

    async fn synthesize(&self, text: &str, voice: &VoiceId) -> SwitchboardResult<AudioClip> {
        self.spoken.lock().expect("mock lock poisoned").push(SpokenLine {
            text: text.to_string(),
            voice: voice.clone(),
        });
        Ok(AudioClip::new(text.as_bytes().to_vec()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
