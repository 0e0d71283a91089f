use std::env;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use parley::session::{SessionController, SessionState};
use parley::{
    ChatCompleter, ConfigManager, GatewayClient, GatewayConfig, InterviewRole, InterviewRound,
    NullRecognizer, SpeechError, SpeechSynthesizer, APP_NAME_PRETTY, DEFAULT_LOG_LEVEL, VERSION,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Synthesizer for the terminal frontend. "Speaks" by printing the text on
/// its own line; completion is immediate.
struct ConsoleSynthesizer;

#[async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        println!("[voice] {text}");
        Ok(())
    }

    fn cancel(&self) {}

    fn name(&self) -> &str {
        "console"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PARLEY_LOG")
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .init();

    // Load config
    let config_manager = ConfigManager::new()?;
    let config = Arc::new(RwLock::new(config_manager.load()?));
    // save back the config to create the file if it doesn't exist
    config_manager.save(&config.read())?;

    // The bearer token comes from the config file or the environment; its
    // absence disables every network-dependent action.
    let api_key = config
        .read()
        .api_key()
        .map(str::to_string)
        .or_else(|| env::var("PARLEY_API_KEY").ok());

    let gateway: Option<Arc<dyn ChatCompleter>> = match api_key {
        Some(key) => {
            let base_url = config.read().base_url().to_string();
            Some(Arc::new(GatewayClient::new(GatewayConfig::new(
                key, base_url,
            ))))
        }
        None => {
            warn!(
                config_path = %config_manager.config_path().display(),
                "no API key configured, question and feedback generation are disabled"
            );
            None
        }
    };

    // The terminal frontend has no microphone capability; answers are typed.
    // Speech output degrades to printed lines.
    let recognizer = Arc::new(NullRecognizer);
    let synthesizer = Arc::new(ConsoleSynthesizer);
    let mut controller = SessionController::new(config, gateway, recognizer, synthesizer);

    println!("{APP_NAME_PRETTY} {VERSION} - mock interview practice");
    println!("Type `help` for commands.");
    if controller.state().error.is_empty() {
        info!("{} ready", APP_NAME_PRETTY);
    }
    render(controller.state());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "start" => controller.start_interview().await,
            "role" => match rest.parse::<InterviewRole>() {
                Ok(role) => controller.set_role(role),
                Err(err) => println!("{err}"),
            },
            "round" => match rest.parse::<InterviewRound>() {
                Ok(round) => controller.set_round(round),
                Err(err) => println!("{err}"),
            },
            "answer" => controller.set_answer(rest),
            "mic" if rest == "stop" => controller.stop_listening(),
            "mic" => controller.start_listening(),
            "submit" => controller.submit_answer().await,
            "end" => controller.end_interview(),
            "status" => {}
            "help" => {
                print_help();
                continue;
            }
            "quit" | "exit" => break,
            other => {
                println!("unknown command: {other} (try `help`)");
                continue;
            }
        }

        controller.pump_recognition();
        render(controller.state());
    }

    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  start          begin an interview with the selected role/round");
    println!("  role <name>    select role (sde, hr, pm, ds, other)");
    println!("  round <name>   select round (technical, behavioral)");
    println!("  answer <text>  type your answer");
    println!("  mic [stop]     start/stop the microphone, when available");
    println!("  submit         submit the answer for feedback");
    println!("  end            end the interview");
    println!("  status         show the session state");
    println!("  quit           exit");
}

fn render(state: &SessionState) {
    println!();
    println!(
        "[{} | {} | round {} | {}]",
        state.role,
        state.round,
        state.round_index,
        state.phase()
    );
    println!("Q: {}", state.current_question);
    if !state.answer_draft.is_empty() {
        println!("A: {}", state.answer_draft);
    }
    if !state.live_transcript.is_empty() {
        println!("~ {}", state.live_transcript);
    }
    if !state.feedback.is_empty() {
        println!("Feedback: {}", state.feedback);
    }
    if !state.error.is_empty() {
        println!("Error: {}", state.error);
    }
}
