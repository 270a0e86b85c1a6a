//! Audio-output capability.
//!
//! The shell owns the actual audio element; the core only requests state
//! changes and observes whether they took effect. Browsers may refuse to
//! start playback before the user has interacted with the page, so `Play`
//! can legitimately fail with [`PlaybackError::AutoplayBlocked`].

use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op")]
pub enum PlaybackOperation {
    Play,
    Pause,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("audio output not available on this platform")]
    NotAvailable,

    #[error("playback blocked until the user interacts with the page")]
    AutoplayBlocked,

    #[error("playback failed: {message}")]
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlaybackOutput {
    Playing,
    Paused,
}

impl PlaybackOutput {
    #[must_use]
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

pub type PlaybackResult = Result<PlaybackOutput, PlaybackError>;

impl Operation for PlaybackOperation {
    type Output = PlaybackResult;
}

pub struct Playback<Ev> {
    context: CapabilityContext<PlaybackOperation, Ev>,
}

impl<Ev> Capability<Ev> for Playback<Ev> {
    type Operation = PlaybackOperation;
    type MappedSelf<MappedEv> = Playback<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Playback::new(self.context.map_event(f))
    }
}

impl<Ev> Playback<Ev>
where
    Ev: 'static,
{
    #[must_use]
    pub fn new(context: CapabilityContext<PlaybackOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn play<F>(&self, make_event: F)
    where
        F: FnOnce(PlaybackResult) -> Ev + Send + 'static,
    {
        self.request(PlaybackOperation::Play, make_event);
    }

    pub fn pause<F>(&self, make_event: F)
    where
        F: FnOnce(PlaybackResult) -> Ev + Send + 'static,
    {
        self.request(PlaybackOperation::Pause, make_event);
    }

    fn request<F>(&self, operation: PlaybackOperation, make_event: F)
    where
        F: FnOnce(PlaybackResult) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context.request_from_shell(operation).await;
            context.update_app(make_event(result));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_state_checks() {
        assert!(PlaybackOutput::Playing.is_playing());
        assert!(!PlaybackOutput::Paused.is_playing());
    }

    #[test]
    fn operation_serialization_round_trips() {
        for op in [PlaybackOperation::Play, PlaybackOperation::Pause] {
            let json = serde_json::to_string(&op).unwrap();
            let restored: PlaybackOperation = serde_json::from_str(&json).unwrap();
            assert_eq!(op, restored);
        }
    }

    #[test]
    fn error_serialization_round_trips() {
        let error = PlaybackError::Failed {
            message: "decoder stalled".into(),
        };
        let json = serde_json::to_string(&error).unwrap();
        let restored: PlaybackError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, restored);
    }
}
