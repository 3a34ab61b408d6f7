//! Speech source port interface

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Speech source errors
#[derive(Debug, Clone, Error)]
pub enum SpeechError {
    #[error("Speech recognition permission denied")]
    PermissionDenied,

    #[error("Audio input unavailable")]
    DeviceUnavailable,

    #[error("Recognition stream failed: {0}")]
    StreamFailed(String),
}

/// Event emitted by a streaming recognition source.
///
/// Partial results carry the full cumulative transcript so far; each one
/// replaces the previous text rather than appending to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Partial(String),
    Final(String),
    Error(String),
}

/// Port for a streaming voice-to-text source
#[async_trait]
pub trait SpeechSource: Send + Sync {
    /// Open the audio stream and begin recognition.
    ///
    /// # Returns
    /// A receiver of recognition events, or an error when the stream
    /// cannot be opened (including denied microphone/speech permission).
    async fn start(&self) -> Result<mpsc::Receiver<RecognitionEvent>, SpeechError>;

    /// Detach the audio input and cancel recognition.
    /// Must be safe to call when no stream is active.
    async fn stop(&self);
}
