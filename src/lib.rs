// Re-export from sub-crates
pub use parley_core::{
    Config, ConfigManager, InterviewRole, InterviewRound, SessionPhase, APP_NAME, APP_NAME_PRETTY,
    DEFAULT_LOG_LEVEL,
};
pub use parley_gateway::{
    ChatCompleter, ChatCompletion, ChatMessage, CompletionOptions, GatewayClient, GatewayConfig,
    GatewayError,
};
pub use parley_speech::{
    ListeningHandle, NullRecognizer, NullSynthesizer, RecognitionEvent, SpeechError,
    SpeechRecognizer, SpeechSynthesizer,
};

// App-specific modules
pub mod prompt;
pub mod session;

// Version from this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
