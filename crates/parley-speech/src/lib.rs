//! Speech capability interfaces for parley.
//!
//! Speech recognition and synthesis engines are platform services with no
//! universal cross-platform equivalent, so this crate only defines the
//! capability seams: a [`SpeechRecognizer`] that streams recognition events
//! for one utterance, and a [`SpeechSynthesizer`] that reads text aloud with
//! an exactly-once completion contract. The [`NullRecognizer`] and
//! [`NullSynthesizer`] implementations stand in when a capability is absent,
//! degrading the affected feature without taking down the session.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

/// Errors raised by speech capabilities.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("capability not available on this platform")]
    Unavailable,

    #[error("speech engine error: {0}")]
    Runtime(String),
}

/// Result type for speech operations.
pub type Result<T> = std::result::Result<T, SpeechError>;

/// A single event from an in-progress recognition.
///
/// `Result` carries one event batch: every interim segment of the batch
/// folded into `interim`, every finalized segment folded into `finalized`.
/// Either string may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Result { interim: String, finalized: String },
    /// The engine stopped listening for this utterance.
    End,
    /// The engine failed mid-utterance. Terminates the utterance.
    Error(String),
}

/// Handle to an active listening session. Events arrive on an unbounded
/// channel; call [`ListeningHandle::stop`] to request end-of-utterance.
pub struct ListeningHandle {
    events: mpsc::UnboundedReceiver<RecognitionEvent>,
    stop: Option<Box<dyn FnOnce() + Send>>,
}

impl std::fmt::Debug for ListeningHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListeningHandle")
            .field("stop_pending", &self.stop.is_some())
            .finish_non_exhaustive()
    }
}

impl ListeningHandle {
    /// Build a handle from an event receiver and a stop action. Recognizer
    /// implementations construct this in `start`.
    pub fn new(
        events: mpsc::UnboundedReceiver<RecognitionEvent>,
        stop: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            events,
            stop: Some(Box::new(stop)),
        }
    }

    /// Drain one pending event without waiting, if any.
    pub fn try_next(&mut self) -> Option<RecognitionEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the next event. Returns `None` once the engine side is gone.
    pub async fn next_event(&mut self) -> Option<RecognitionEvent> {
        self.events.recv().await
    }

    /// Ask the engine to finish the current utterance. Idempotent; the
    /// engine is still expected to deliver its `End` event afterwards.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            debug!("requesting end of utterance");
            stop();
        }
    }
}

/// Speech-to-text capability. Configured for a single utterance with interim
/// results; the locale is an implementation concern.
///
/// Callers must check their own listening flag before calling `start` again:
/// starting while a previous utterance is still active is not a defined
/// transition.
pub trait SpeechRecognizer: Send + Sync {
    /// Begin listening for one utterance.
    fn start(&self) -> Result<ListeningHandle>;

    /// Returns the name of this recognizer for logging/debugging.
    fn name(&self) -> &str;
}

/// Text-to-speech capability.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text` aloud and return once the utterance has ended.
    ///
    /// Implementations must cancel any utterance already in progress before
    /// starting (at most one utterance is ever active), and must complete
    /// exactly once whether speech ends normally or errors, so chained logic
    /// waiting on the return is never stalled.
    async fn speak(&self, text: &str) -> Result<()>;

    /// Stop whatever is currently being spoken, if anything.
    fn cancel(&self);

    /// Returns the name of this synthesizer for logging/debugging.
    fn name(&self) -> &str;
}

/// Recognizer used when no speech-to-text engine is available. `start`
/// reports the capability as absent so the caller can fall back to typed
/// input.
#[derive(Debug, Default)]
pub struct NullRecognizer;

impl SpeechRecognizer for NullRecognizer {
    fn start(&self) -> Result<ListeningHandle> {
        Err(SpeechError::Unavailable)
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Synthesizer used when no text-to-speech engine is available. `speak`
/// reports the capability as absent but still returns immediately, keeping
/// the completion contract intact.
#[derive(Debug, Default)]
pub struct NullSynthesizer;

#[async_trait]
impl SpeechSynthesizer for NullSynthesizer {
    async fn speak(&self, _text: &str) -> Result<()> {
        Err(SpeechError::Unavailable)
    }

    fn cancel(&self) {}

    fn name(&self) -> &str {
        "null"
    }
}
