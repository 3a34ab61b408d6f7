//! Capture session state machine

use std::fmt;
use thiserror::Error;

/// Capture session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Recording,
}

impl CaptureState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: CaptureState,
    pub action: String,
}

/// Capture session entity.
/// Manages state transitions for one voice-capture attempt.
///
/// State machine:
///   IDLE -> RECORDING (start)
///   RECORDING -> IDLE (stop)
///
/// Every teardown path (explicit stop, silence timer, final result,
/// stream error) funnels through `stop`, so whichever path wins the
/// transition performs teardown exactly once.
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
}

impl CaptureSession {
    /// Create a new capture session in idle state
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == CaptureState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    /// Transition from IDLE to RECORDING
    pub fn start(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != CaptureState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "start capture".to_string(),
            });
        }
        self.state = CaptureState::Recording;
        Ok(())
    }

    /// Transition from RECORDING to IDLE
    pub fn stop(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != CaptureState::Recording {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "stop capture".to_string(),
            });
        }
        self.state = CaptureState::Idle;
        Ok(())
    }
}
