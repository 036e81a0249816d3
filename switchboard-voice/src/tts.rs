//! Text-to-speech backend trait

use crate::types::{AudioClip, VoiceId};
use async_trait::async_trait;
use switchboard_core::SwitchboardResult;

/// A text-to-speech backend.
///
/// The voice id selects among the backend's voices; each agent may
/// carry its own voice override so callers hear a distinct voice per
/// persona.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Backend name for diagnostics.
    fn name(&self) -> &str;

    /// Synthesize narration audio for the given text.
    async fn synthesize(&self, text: &str, voice: &VoiceId) -> SwitchboardResult<AudioClip>;
}
