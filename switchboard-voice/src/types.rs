//! Audio payload and voice identity types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a synthesis voice, as understood by the TTS backend
/// (e.g. "alloy", "echo", "onyx").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceId(String);

impl VoiceId {
    /// Create a voice id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VoiceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A chunk of encoded audio, opaque to the core.
///
/// The encoding is whatever the producing backend emits; the core never
/// inspects the bytes, it only moves them between backends and the
/// transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioClip {
    /// Encoded audio bytes.
    pub data: Vec<u8>,
    /// Sample rate in Hz, when the backend reports one.
    pub sample_rate: Option<u32>,
}

impl AudioClip {
    /// Wrap encoded bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            sample_rate: None,
        }
    }

    /// Attach a sample rate.
    pub fn with_sample_rate(mut self, hz: u32) -> Self {
        self.sample_rate = Some(hz);
        self
    }
}

/// Text produced by a speech-to-text backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// The recognized text.
    pub text: String,
    /// Backend confidence in [0, 1], when reported.
    pub confidence: Option<f32>,
}

impl Transcript {
    /// A transcript with no confidence score.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
        }
    }
}
