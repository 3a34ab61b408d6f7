//! Voice capture use case

use std::sync::Arc;
use std::time::Duration as StdDuration;

use thiserror::Error;
use tokio::sync::{mpsc, watch, Mutex, Notify};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::application::ports::{RecognitionEvent, SpeechError, SpeechSource};
use crate::domain::capture::{CaptureSession, InvalidStateTransition};
use crate::domain::duration::Duration;

/// Errors from the capture use case
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Speech source failed: {0}")]
    Speech(#[from] SpeechError),

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Handler invoked with the finalized transcript of a capture session
pub type TranscriptHandler = Arc<dyn Fn(String) + Send + Sync>;

/// Voice capture controller.
///
/// Runs one start-to-stop transcription cycle at a time: partial results
/// replace the observable transcript and re-arm the silence window; a
/// final result hands the transcript to the external handler; silence,
/// stream errors, explicit stop, and end-of-stream all tear the session
/// down through the same state transition, so teardown happens exactly
/// once no matter which path fires first.
pub struct CaptureController<S>
where
    S: SpeechSource + 'static,
{
    source: Arc<S>,
    session: Arc<Mutex<CaptureSession>>,
    transcript: Arc<watch::Sender<String>>,
    stop_signal: Mutex<Arc<Notify>>,
    silence_threshold: StdDuration,
    on_final: Option<TranscriptHandler>,
}

impl<S> CaptureController<S>
where
    S: SpeechSource + 'static,
{
    /// Create a new capture controller
    pub fn new(
        source: Arc<S>,
        silence_threshold: Duration,
        on_final: Option<TranscriptHandler>,
    ) -> Self {
        let (transcript, _rx) = watch::channel(String::new());
        Self {
            source,
            session: Arc::new(Mutex::new(CaptureSession::new())),
            transcript: Arc::new(transcript),
            stop_signal: Mutex::new(Arc::new(Notify::new())),
            silence_threshold: silence_threshold.as_std(),
            on_final,
        }
    }

    /// Start a capture session. Valid only from idle.
    ///
    /// Clears the transcript, opens the speech stream, and spawns the
    /// event loop. Errors from the source (including denied speech
    /// permission) are surfaced to the caller and fold the session
    /// back to idle.
    pub async fn start(&self) -> Result<JoinHandle<()>, CaptureError> {
        self.session.lock().await.start()?;
        self.transcript.send_replace(String::new());

        let events = match self.source.start().await {
            Ok(events) => events,
            Err(e) => {
                // Fold back to idle; the transition cannot fail here
                let _ = self.session.lock().await.stop();
                return Err(e.into());
            }
        };

        let stop = Arc::new(Notify::new());
        *self.stop_signal.lock().await = Arc::clone(&stop);

        debug!("capture session started");
        Ok(tokio::spawn(event_loop(
            events,
            stop,
            Arc::clone(&self.session),
            Arc::clone(&self.source),
            Arc::clone(&self.transcript),
            self.silence_threshold,
            self.on_final.clone(),
        )))
    }

    /// Stop the current capture session. No-op when idle.
    pub async fn stop(&self) {
        self.stop_signal.lock().await.notify_one();
        if finish(&self.session, self.source.as_ref()).await {
            debug!("capture session stopped by caller");
        }
    }

    /// Whether a capture session is active
    pub async fn is_recording(&self) -> bool {
        self.session.lock().await.is_recording()
    }

    /// Subscribe to transcript updates
    pub fn transcript(&self) -> watch::Receiver<String> {
        self.transcript.subscribe()
    }

    /// Snapshot of the current transcript
    pub fn current_transcript(&self) -> String {
        self.transcript.borrow().clone()
    }
}

/// Recognition event loop with a silence window around every receive.
///
/// Single exit point: whichever way the loop ends, teardown runs through
/// `finish` and loses gracefully if another path got there first.
async fn event_loop<S>(
    mut events: mpsc::Receiver<RecognitionEvent>,
    stop: Arc<Notify>,
    session: Arc<Mutex<CaptureSession>>,
    source: Arc<S>,
    transcript: Arc<watch::Sender<String>>,
    silence_threshold: StdDuration,
    on_final: Option<TranscriptHandler>,
) where
    S: SpeechSource,
{
    loop {
        let received = tokio::select! {
            _ = stop.notified() => break,
            received = timeout(silence_threshold, events.recv()) => received,
        };

        match received {
            Ok(Some(RecognitionEvent::Partial(text))) => {
                transcript.send_replace(text);
            }
            Ok(Some(RecognitionEvent::Final(text))) => {
                transcript.send_replace(text.clone());
                let final_text = text.trim().to_string();
                if !final_text.is_empty() {
                    if let Some(handler) = &on_final {
                        handler(final_text);
                    }
                }
                break;
            }
            Ok(Some(RecognitionEvent::Error(reason))) => {
                warn!(%reason, "recognition stream error, stopping capture");
                break;
            }
            Ok(None) => break,
            Err(_elapsed) => {
                debug!("silence threshold reached, stopping capture");
                break;
            }
        }
    }

    finish(&session, source.as_ref()).await;
}

/// Attempt the stop transition; the winner detaches the speech source.
/// Returns false when another teardown path already completed.
async fn finish<S>(session: &Mutex<CaptureSession>, source: &S) -> bool
where
    S: SpeechSource,
{
    let stopped = session.lock().await.stop().is_ok();
    if stopped {
        source.stop().await;
    }
    stopped
}
