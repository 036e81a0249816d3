//! Speech-to-text backend trait

use crate::types::{AudioClip, Transcript};
use async_trait::async_trait;
use switchboard_core::SwitchboardResult;

/// A speech-to-text backend.
///
/// Implementations wrap whatever service or process produces text from
/// caller audio. Failures map into `BackendError::RequestFailed` with
/// the backend's name so the driver can report which collaborator fell
/// over.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Backend name for diagnostics.
    fn name(&self) -> &str;

    /// Transcribe one clip of caller audio.
    async fn transcribe(&self, audio: &AudioClip) -> SwitchboardResult<Transcript>;
}
