//! The interview session controller.
//!
//! One [`SessionController`] owns all mutable session state and sequences the
//! gateway, recognizer, and synthesizer in response to user actions. It has
//! no rendering responsibility: every side effect lands in [`SessionState`],
//! which the presentation layer reads after each operation.

use std::sync::Arc;

use parking_lot::RwLock;
use parley_core::{Config, InterviewRole, InterviewRound, SessionPhase};
use parley_gateway::{ChatCompleter, CompletionOptions, GatewayError};
use parley_speech::{
    ListeningHandle, RecognitionEvent, SpeechError, SpeechRecognizer, SpeechSynthesizer,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::prompt;

/// Question shown before the first session starts.
pub const WELCOME_MESSAGE: &str = "Start an interview to get your first question.";

/// Transient status text while a question request is in flight.
pub const GENERATING_MESSAGE: &str = "Generating your question...";

/// Question slot text after a session ends.
pub const ENDED_MESSAGE: &str = "Interview ended. Start a new interview to begin another session.";

const QUESTION_TEMPERATURE: f32 = 0.7;
const QUESTION_MAX_TOKENS: u32 = 150;
const FEEDBACK_TEMPERATURE: f32 = 0.7;
// Large enough for feedback plus the follow-up question.
const FEEDBACK_MAX_TOKENS: u32 = 500;

/// Errors surfaced by session operations. Each is terminal for the
/// triggering action only; the session itself is never forcibly ended.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no API credential configured; set api_key in the config file or export PARLEY_API_KEY")]
    MissingCredential,

    #[error("the model returned a response with no usable content")]
    MalformedResponse,

    #[error("provide an answer before submitting")]
    EmptyAnswer,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Speech(#[from] SpeechError),
}

/// All mutable state of one interview session.
///
/// Created with placeholder text, reset fully on start and end. Exactly one
/// of `feedback`/`error` is populated for the feedback region: the
/// `display_*` helpers clear the sibling slot, while `note_error` records
/// speech-side errors without disturbing displayed feedback.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Role being interviewed for; fixed once a session starts
    pub role: InterviewRole,
    /// Round kind; fixed once a session starts
    pub round: InterviewRound,
    /// Current prompt text, or transient status text while loading
    pub current_question: String,
    /// Accumulated answer; append-only from speech, replaced by typed input
    pub answer_draft: String,
    /// Ephemeral interim transcript, never merged until finalized
    pub live_transcript: String,
    /// Feedback for the previous answer
    pub feedback: String,
    /// Last user-visible error
    pub error: String,
    /// Count of questions asked this session
    pub round_index: u32,
    pub question_loading: bool,
    pub feedback_loading: bool,
    pub ai_speaking: bool,
    pub user_listening: bool,
    pub session_active: bool,
}

impl SessionState {
    fn new(role: InterviewRole, round: InterviewRound) -> Self {
        Self {
            role,
            round,
            current_question: WELCOME_MESSAGE.to_string(),
            answer_draft: String::new(),
            live_transcript: String::new(),
            feedback: String::new(),
            error: String::new(),
            round_index: 0,
            question_loading: false,
            feedback_loading: false,
            ai_speaking: false,
            user_listening: false,
            session_active: false,
        }
    }

    /// Derive the coarse phase for display and logging.
    pub fn phase(&self) -> SessionPhase {
        if self.question_loading {
            SessionPhase::QuestionLoading
        } else if self.feedback_loading {
            SessionPhase::FeedbackLoading
        } else if self.ai_speaking {
            SessionPhase::Speaking
        } else if self.user_listening {
            SessionPhase::Listening
        } else if self.session_active {
            SessionPhase::QuestionReady
        } else {
            SessionPhase::Idle
        }
    }

    fn display_question(&mut self, question: String) {
        self.current_question = question;
        self.feedback.clear();
        self.error.clear();
    }

    fn display_feedback(&mut self, feedback: String) {
        self.feedback = feedback;
        self.error.clear();
    }

    fn display_error(&mut self, message: impl ToString) {
        self.error = message.to_string();
        self.feedback.clear();
    }

    /// Record an error without clearing displayed feedback. Used for speech
    /// failures, which should not wipe out model output already on screen.
    fn note_error(&mut self, message: impl ToString) {
        self.error = message.to_string();
    }
}

/// The orchestrating state machine for one mock interview.
pub struct SessionController {
    state: SessionState,
    config: Arc<RwLock<Config>>,
    gateway: Option<Arc<dyn ChatCompleter>>,
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    listening: Option<ListeningHandle>,
}

impl SessionController {
    /// Build a controller. `gateway` is `None` when no credential is
    /// configured, which disables every network-dependent action.
    pub fn new(
        config: Arc<RwLock<Config>>,
        gateway: Option<Arc<dyn ChatCompleter>>,
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let (role, round) = {
            let config = config.read();
            (config.role, config.round)
        };
        Self {
            state: SessionState::new(role, round),
            config,
            gateway,
            recognizer,
            synthesizer,
            listening: None,
        }
    }

    /// The session state, as the presentation layer reads it.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Select the role for the next session. Ignored while a session is
    /// running.
    pub fn set_role(&mut self, role: InterviewRole) {
        if self.state.session_active {
            warn!(%role, "role change ignored during an active session");
            return;
        }
        self.state.role = role;
    }

    /// Select the round for the next session. Ignored while a session is
    /// running.
    pub fn set_round(&mut self, round: InterviewRound) {
        if self.state.session_active {
            warn!(%round, "round change ignored during an active session");
            return;
        }
        self.state.round = round;
    }

    /// Replace the answer draft wholesale. The typed-input path.
    pub fn set_answer(&mut self, text: impl Into<String>) {
        self.state.answer_draft = text.into();
    }

    /// Begin a session: reset the round counter and ask the first question.
    pub async fn start_interview(&mut self) {
        info!(role = %self.state.role, round = %self.state.round, "starting interview");
        self.state.session_active = true;
        self.state.round_index = 0;
        self.generate_question().await;
    }

    /// Ask the model for a fresh question, then speak it.
    pub async fn generate_question(&mut self) {
        let Some(gateway) = self.gateway.clone() else {
            self.state.display_error(SessionError::MissingCredential);
            self.state.question_loading = false;
            return;
        };

        self.state.feedback.clear();
        self.state.answer_draft.clear();
        self.state.live_transcript.clear();
        self.state.error.clear();
        self.state.current_question = GENERATING_MESSAGE.to_string();
        self.state.question_loading = true;
        self.synthesizer.cancel();
        self.stop_listening();

        let messages = prompt::question_messages(self.state.role, self.state.round);
        let options = self.question_options();
        let result = gateway.complete(&messages, &options).await;
        self.state.question_loading = false;

        match result.map(|completion| completion.into_text()) {
            Ok(Some(question)) => {
                info!(round = self.state.round_index + 1, "question ready");
                self.state.display_question(question.clone());
                self.state.round_index += 1;
                self.speak(&question).await;
            }
            Ok(None) => {
                warn!("question response had no usable content");
                self.state.display_error(SessionError::MalformedResponse);
            }
            Err(err) => {
                warn!(error = %err, "question request failed");
                self.state
                    .display_error(format!("Failed to generate a question: {err}"));
            }
        }
    }

    /// Start capturing a spoken answer. Clears the previous draft and stops
    /// any in-progress speech output first.
    pub fn start_listening(&mut self) {
        if self.state.user_listening {
            debug!("already listening, ignoring start");
            return;
        }

        self.state.live_transcript.clear();
        self.state.error.clear();
        self.state.answer_draft.clear();
        // The mic and the speaker are mutually exclusive.
        self.synthesizer.cancel();
        self.state.ai_speaking = false;

        match self.recognizer.start() {
            Ok(handle) => {
                info!(recognizer = self.recognizer.name(), "listening for answer");
                self.listening = Some(handle);
                self.state.user_listening = true;
            }
            Err(err) => {
                warn!(error = %err, "speech recognition unavailable");
                self.state
                    .note_error(format!("Speech recognition is not available: {err}"));
            }
        }
    }

    /// Ask the recognizer to finish the current utterance.
    pub fn stop_listening(&mut self) {
        if let Some(handle) = self.listening.as_mut() {
            handle.stop();
        }
        if self.state.user_listening {
            debug!("stopped listening");
        }
        self.state.user_listening = false;
    }

    /// Apply one recognition event to the session state.
    pub fn apply_recognition(&mut self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Result { interim, finalized } => {
                self.state.live_transcript = interim;
                let finalized = finalized.trim();
                if !finalized.is_empty() {
                    if !self.state.answer_draft.is_empty() {
                        self.state.answer_draft.push(' ');
                    }
                    self.state.answer_draft.push_str(finalized);
                    self.state.live_transcript.clear();
                }
            }
            RecognitionEvent::End => {
                debug!("recognition ended");
                self.listening = None;
                self.state.user_listening = false;
                self.state.live_transcript.clear();
            }
            RecognitionEvent::Error(message) => {
                warn!(error = %message, "recognition error");
                self.listening = None;
                self.state.user_listening = false;
                self.state.live_transcript.clear();
                self.state
                    .note_error(format!("Speech recognition error: {message}"));
            }
        }
    }

    /// Drain and apply any recognition events that arrived since the last
    /// call.
    pub fn pump_recognition(&mut self) {
        while let Some(event) = self.listening.as_mut().and_then(|handle| handle.try_next()) {
            self.apply_recognition(event);
        }
    }

    /// Submit the current answer draft for feedback plus a follow-up
    /// question.
    ///
    /// The combined response is split at the follow-up delimiter when the
    /// model honored it; the extracted question is adopted directly after
    /// the feedback has been spoken, with no second request. Without a
    /// delimiter the whole response is feedback and a fresh question is
    /// generated instead.
    pub async fn submit_answer(&mut self) {
        self.stop_listening();

        let answer = self.state.answer_draft.trim().to_string();
        if answer.is_empty() {
            self.state.display_error(SessionError::EmptyAnswer);
            return;
        }

        let Some(gateway) = self.gateway.clone() else {
            self.state.display_error(SessionError::MissingCredential);
            return;
        };

        self.state.feedback.clear();
        self.state.error.clear();
        self.state.feedback_loading = true;
        self.synthesizer.cancel();

        let messages = prompt::feedback_messages(
            self.state.role,
            self.state.round,
            &self.state.current_question,
            &answer,
        );
        let options = self.feedback_options();
        let result = gateway.complete(&messages, &options).await;
        self.state.feedback_loading = false;

        match result.map(|completion| completion.into_text()) {
            Ok(Some(full)) => {
                let (feedback, next_question) = prompt::split_feedback(&full);
                self.state.display_feedback(feedback.clone());
                self.speak(&feedback).await;

                match next_question {
                    Some(question) => {
                        info!(round = self.state.round_index + 1, "follow-up question adopted");
                        self.state.current_question = question.clone();
                        self.state.round_index += 1;
                        self.speak(&question).await;
                    }
                    None => {
                        debug!("no follow-up delimiter found, generating a fresh question");
                        self.generate_question().await;
                    }
                }
            }
            Ok(None) => {
                warn!("feedback response had no usable content");
                self.state.display_error(SessionError::MalformedResponse);
            }
            Err(err) => {
                warn!(error = %err, "feedback request failed");
                self.state
                    .display_error(format!("Failed to generate feedback: {err}"));
            }
        }
    }

    /// End the session from any state and reset to the idle placeholder.
    pub fn end_interview(&mut self) {
        info!(rounds = self.state.round_index, "ending interview");
        self.state.session_active = false;
        self.state.round_index = 0;
        self.state.feedback.clear();
        self.state.error.clear();
        self.state.answer_draft.clear();
        self.state.live_transcript.clear();
        self.state.current_question = ENDED_MESSAGE.to_string();
        self.synthesizer.cancel();
        self.state.ai_speaking = false;
        self.stop_listening();
        self.listening = None;
    }

    /// Speak `text`, honoring the exactly-once completion contract: this
    /// returns once the synthesizer is done, whatever happened. The mic is
    /// stopped first so input and output are never active together.
    async fn speak(&mut self, text: &str) {
        self.stop_listening();
        self.state.ai_speaking = true;
        let result = self.synthesizer.speak(text).await;
        self.state.ai_speaking = false;

        match result {
            Ok(()) => {}
            Err(SpeechError::Unavailable) => {
                // Degraded silent flow; the frontend shows a one-time warning.
                debug!(
                    synthesizer = self.synthesizer.name(),
                    "speech synthesis unavailable, staying silent"
                );
            }
            Err(err) => {
                self.state.note_error(format!("Speech synthesis error: {err}"));
            }
        }
    }

    fn question_options(&self) -> CompletionOptions {
        CompletionOptions::new(
            self.config.read().model(),
            QUESTION_TEMPERATURE,
            QUESTION_MAX_TOKENS,
        )
    }

    fn feedback_options(&self) -> CompletionOptions {
        CompletionOptions::new(
            self.config.read().model(),
            FEEDBACK_TEMPERATURE,
            FEEDBACK_MAX_TOKENS,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use parley_gateway::ChatCompletion;
    use tokio::sync::mpsc;

    use super::*;

    struct ScriptedModel {
        replies: Mutex<VecDeque<parley_gateway::Result<ChatCompletion>>>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn new(replies: Vec<parley_gateway::Result<ChatCompletion>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatCompleter for ScriptedModel {
        async fn complete(
            &self,
            _messages: &[parley_gateway::ChatMessage],
            _options: &CompletionOptions,
        ) -> parley_gateway::Result<ChatCompletion> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(ChatCompletion::from_text("fallback question")))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[derive(Default)]
    struct RecordingSynth {
        spoken: Mutex<Vec<String>>,
        cancels: AtomicUsize,
    }

    #[async_trait]
    impl SpeechSynthesizer for RecordingSynth {
        async fn speak(&self, text: &str) -> parley_speech::Result<()> {
            self.spoken.lock().push(text.to_string());
            Ok(())
        }

        fn cancel(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    /// Recognizer whose handle delivers a pre-seeded event script.
    #[derive(Default)]
    struct ScriptedRecognizer {
        events: Mutex<Vec<RecognitionEvent>>,
    }

    impl ScriptedRecognizer {
        fn with_events(events: Vec<RecognitionEvent>) -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(events),
            })
        }
    }

    impl SpeechRecognizer for ScriptedRecognizer {
        fn start(&self) -> parley_speech::Result<ListeningHandle> {
            let (tx, rx) = mpsc::unbounded_channel();
            for event in self.events.lock().drain(..) {
                tx.send(event).ok();
            }
            Ok(ListeningHandle::new(rx, move || drop(tx)))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn controller_with(
        model: Option<Arc<ScriptedModel>>,
        recognizer: Arc<dyn SpeechRecognizer>,
        synth: Arc<RecordingSynth>,
    ) -> SessionController {
        let config = Arc::new(RwLock::new(Config::default()));
        let gateway = model.map(|m| m as Arc<dyn ChatCompleter>);
        SessionController::new(config, gateway, recognizer, synth)
    }

    fn simple_controller(
        replies: Vec<parley_gateway::Result<ChatCompletion>>,
    ) -> (SessionController, Arc<ScriptedModel>, Arc<RecordingSynth>) {
        let model = ScriptedModel::new(replies);
        let synth = Arc::new(RecordingSynth::default());
        let controller = controller_with(
            Some(model.clone()),
            ScriptedRecognizer::with_events(vec![]),
            synth.clone(),
        );
        (controller, model, synth)
    }

    #[tokio::test]
    async fn empty_answer_issues_no_request() {
        let (mut controller, model, _synth) = simple_controller(vec![]);
        controller.set_answer("   \n ");

        controller.submit_answer().await;

        assert_eq!(model.calls(), 0);
        assert!(controller.state().error.contains("answer"));
        assert!(!controller.state().feedback_loading);
    }

    #[tokio::test]
    async fn question_is_stored_spoken_and_counted() {
        let (mut controller, model, synth) = simple_controller(vec![Ok(
            ChatCompletion::from_text("What is a binary search tree?"),
        )]);

        controller.start_interview().await;

        let state = controller.state();
        assert_eq!(state.current_question, "What is a binary search tree?");
        assert_eq!(state.round_index, 1);
        assert!(state.session_active);
        assert!(!state.question_loading);
        assert_eq!(model.calls(), 1);
        assert_eq!(
            synth.spoken.lock().as_slice(),
            ["What is a binary search tree?"]
        );
    }

    #[tokio::test]
    async fn delimited_feedback_adopts_follow_up_without_new_request() {
        let (mut controller, model, synth) = simple_controller(vec![
            Ok(ChatCompletion::from_text("First question?")),
            Ok(ChatCompletion::from_text(
                "Good use of examples.\n\nNext Question: How would you scale this service?",
            )),
        ]);

        controller.start_interview().await;
        controller.set_answer("I would use a hash map.");
        controller.submit_answer().await;

        let state = controller.state();
        assert_eq!(state.feedback, "Good use of examples.");
        assert_eq!(state.current_question, "How would you scale this service?");
        assert_eq!(state.round_index, 2);
        // One call for the first question, one for feedback; none for the
        // adopted follow-up.
        assert_eq!(model.calls(), 2);
        let spoken = synth.spoken.lock();
        assert_eq!(
            spoken.as_slice(),
            [
                "First question?",
                "Good use of examples.",
                "How would you scale this service?"
            ]
        );
    }

    #[tokio::test]
    async fn undelimited_feedback_generates_a_fresh_question() {
        let (mut controller, model, _synth) = simple_controller(vec![
            Ok(ChatCompletion::from_text("First question?")),
            Ok(ChatCompletion::from_text(
                "All of this is feedback with no delimiter anywhere.",
            )),
            Ok(ChatCompletion::from_text("Second question?")),
        ]);

        controller.start_interview().await;
        controller.set_answer("An answer.");
        controller.submit_answer().await;

        let state = controller.state();
        assert_eq!(state.current_question, "Second question?");
        assert_eq!(state.round_index, 2);
        // Question, feedback, and the fresh follow-up question.
        assert_eq!(model.calls(), 3);
        // The fresh question path clears displayed feedback.
        assert!(state.feedback.is_empty());
    }

    #[tokio::test]
    async fn gateway_failure_surfaces_status_and_body() {
        let (mut controller, _model, _synth) = simple_controller(vec![
            Ok(ChatCompletion::from_text("First question?")),
            Err(GatewayError::Api {
                status: 500,
                body: "upstream exploded".to_string(),
            }),
        ]);

        controller.start_interview().await;
        controller.set_answer("An answer.");
        controller.submit_answer().await;

        let state = controller.state();
        assert!(state.error.contains("500"));
        assert!(state.error.contains("upstream exploded"));
        assert!(!state.feedback_loading);
        // Neither the question nor the feedback advanced.
        assert_eq!(state.current_question, "First question?");
        assert!(state.feedback.is_empty());
        assert_eq!(state.round_index, 1);
    }

    #[tokio::test]
    async fn malformed_question_response_sets_error() {
        let (mut controller, _model, synth) =
            simple_controller(vec![Ok(ChatCompletion::default())]);

        controller.start_interview().await;

        let state = controller.state();
        assert!(state.error.contains("no usable content"));
        assert!(!state.question_loading);
        assert_eq!(state.round_index, 0);
        assert!(synth.spoken.lock().is_empty());
    }

    #[tokio::test]
    async fn missing_credential_disables_network_actions() {
        let synth = Arc::new(RecordingSynth::default());
        let mut controller =
            controller_with(None, ScriptedRecognizer::with_events(vec![]), synth);

        controller.start_interview().await;
        assert!(controller.state().error.contains("credential"));
        assert!(!controller.state().question_loading);

        controller.set_answer("typed answer");
        controller.submit_answer().await;
        assert!(controller.state().error.contains("credential"));
    }

    #[tokio::test]
    async fn interim_events_touch_only_live_transcript() {
        let (mut controller, _model, _synth) = simple_controller(vec![]);

        controller.apply_recognition(RecognitionEvent::Result {
            interim: "how would".to_string(),
            finalized: String::new(),
        });
        controller.apply_recognition(RecognitionEvent::Result {
            interim: "how would I".to_string(),
            finalized: String::new(),
        });

        assert_eq!(controller.state().live_transcript, "how would I");
        assert!(controller.state().answer_draft.is_empty());

        controller.apply_recognition(RecognitionEvent::Result {
            interim: String::new(),
            finalized: "how would I start ".to_string(),
        });

        assert_eq!(controller.state().answer_draft, "how would I start");
        assert!(controller.state().live_transcript.is_empty());

        // A second finalized segment is space-joined.
        controller.apply_recognition(RecognitionEvent::Result {
            interim: String::new(),
            finalized: "with a plan".to_string(),
        });
        assert_eq!(controller.state().answer_draft, "how would I start with a plan");
    }

    #[tokio::test]
    async fn recognition_end_and_error_reset_listening() {
        let recognizer = ScriptedRecognizer::with_events(vec![RecognitionEvent::Result {
            interim: "half an".to_string(),
            finalized: String::new(),
        }]);
        let synth = Arc::new(RecordingSynth::default());
        let mut controller = controller_with(Some(ScriptedModel::new(vec![])), recognizer, synth);

        controller.start_listening();
        assert!(controller.state().user_listening);
        controller.pump_recognition();
        assert_eq!(controller.state().live_transcript, "half an");

        controller.apply_recognition(RecognitionEvent::End);
        assert!(!controller.state().user_listening);
        assert!(controller.state().live_transcript.is_empty());

        controller.apply_recognition(RecognitionEvent::Error("no-speech".to_string()));
        assert!(controller.state().error.contains("no-speech"));
    }

    #[tokio::test]
    async fn listening_and_speaking_are_mutually_exclusive() {
        let recognizer = ScriptedRecognizer::with_events(vec![]);
        let model = ScriptedModel::new(vec![Ok(ChatCompletion::from_text("Question?"))]);
        let synth = Arc::new(RecordingSynth::default());
        let mut controller = controller_with(Some(model), recognizer, synth.clone());

        // Starting the mic cancels any speech output.
        controller.start_listening();
        assert!(controller.state().user_listening);
        assert!(synth.cancels.load(Ordering::SeqCst) >= 1);
        assert!(!controller.state().ai_speaking);

        // Generating (and speaking) a question forces the mic off.
        controller.generate_question().await;
        assert!(!controller.state().user_listening);
        assert!(!synth.spoken.lock().is_empty());
    }

    #[tokio::test]
    async fn start_listening_clears_previous_draft_and_error() {
        let recognizer = ScriptedRecognizer::with_events(vec![]);
        let synth = Arc::new(RecordingSynth::default());
        let mut controller = controller_with(Some(ScriptedModel::new(vec![])), recognizer, synth);

        controller.set_answer("stale draft");
        controller.state.error = "stale error".to_string();
        controller.start_listening();

        assert!(controller.state().answer_draft.is_empty());
        assert!(controller.state().error.is_empty());
    }

    #[tokio::test]
    async fn unavailable_recognizer_degrades_to_typed_input() {
        let synth = Arc::new(RecordingSynth::default());
        let mut controller = controller_with(
            Some(ScriptedModel::new(vec![])),
            Arc::new(parley_speech::NullRecognizer),
            synth,
        );

        controller.start_listening();

        assert!(!controller.state().user_listening);
        assert!(controller.state().error.contains("not available"));
    }

    #[tokio::test]
    async fn end_interview_resets_everything() {
        let (mut controller, _model, synth) = simple_controller(vec![
            Ok(ChatCompletion::from_text("Question?")),
        ]);

        controller.start_interview().await;
        controller.set_answer("half typed");
        controller.end_interview();

        let state = controller.state();
        assert!(!state.session_active);
        assert_eq!(state.round_index, 0);
        assert!(state.answer_draft.is_empty());
        assert!(state.feedback.is_empty());
        assert!(state.error.is_empty());
        assert_eq!(state.current_question, ENDED_MESSAGE);
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert!(synth.cancels.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn role_and_round_are_fixed_during_a_session() {
        let (mut controller, _model, _synth) = simple_controller(vec![
            Ok(ChatCompletion::from_text("Question?")),
        ]);

        controller.set_role(InterviewRole::Hr);
        controller.set_round(InterviewRound::Behavioral);
        controller.start_interview().await;
        controller.set_role(InterviewRole::DataScientist);

        assert_eq!(controller.state().role, InterviewRole::Hr);
        assert_eq!(controller.state().round, InterviewRound::Behavioral);

        controller.end_interview();
        controller.set_role(InterviewRole::DataScientist);
        assert_eq!(controller.state().role, InterviewRole::DataScientist);
    }
}
