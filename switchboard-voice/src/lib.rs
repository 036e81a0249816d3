//! Switchboard Voice - Speech Backend Traits
//!
//! Narrow interfaces for the speech services a voice conversation
//! consumes: speech-to-text for caller audio and text-to-speech for
//! agent narration. The core only ever talks to these traits; concrete
//! network or process-based backends live with the embedder. Mock
//! backends for tests treat clip bytes as UTF-8 text.

pub mod mock;
pub mod stt;
pub mod tts;
pub mod types;

pub use mock::{MockSpeechToText, MockTextToSpeech};
pub use stt::SpeechToText;
pub use tts::TextToSpeech;
pub use types::{AudioClip, Transcript, VoiceId};
