//! Conviva - console entry point
//!
//! Loads the configuration and intent catalogue, greets the user, then reads
//! prompts from stdin until `x` or end of input.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use conviva::core::config::AssistantConfig;
use conviva::core::error::Result;
use conviva::handlers::default_registry;
use conviva::intent::load_catalogue;
use conviva::session::{
    Assistant, CommandVoice, Conversation, SessionWorker, SilentVoice, Transcript, Voice,
};

const DEFAULT_CONFIG: &str = "conviva.toml";
const RELOAD_COMMAND: &str = ":reload";

/// Conviva - a desktop assistant driven by an intent catalogue
#[derive(Parser, Debug)]
#[command(name = "conviva")]
#[command(
    about = "Chat with a rule-based assistant. Type `x` to quit, `:reload` to reload intents."
)]
struct Args {
    /// Config file (TOML). Defaults to ./conviva.toml when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Intent catalogue (.json or .toml)
    #[arg(long)]
    catalogue: Option<PathBuf>,

    /// Conversation log to append to
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Do not write a conversation log
    #[arg(long, conflicts_with = "transcript")]
    no_transcript: bool,

    /// Speak responses aloud
    #[arg(long)]
    speak: bool,

    /// Seed for response selection
    #[arg(long)]
    seed: Option<u64>,

    /// Handler timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("conviva=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    // A broken catalogue is fatal: the fallback intent depends on it
    let catalogue = load_catalogue(&config.catalogue_path)?;
    let registry = Arc::new(default_registry(&config));
    tracing::info!("Handlers registered for: {}", registry.tags().join(", "));

    let transcript = config
        .transcript_path
        .as_deref()
        .and_then(Transcript::open_or_skip);

    let voice: Arc<dyn Voice + Sync> = if config.speak {
        Arc::new(CommandVoice::new(config.voice_program.clone()))
    } else {
        Arc::new(SilentVoice)
    };

    let assistant = Assistant::seeded(catalogue.into(), registry, config.seed);
    let worker = SessionWorker::new(assistant, config.handler_timeout());
    let mut conversation = Conversation::new(worker, voice, transcript);

    let rt = Runtime::new()?;

    let greeting = rt.block_on(conversation.start());
    println!("\nBot: {}", greeting);

    loop {
        print!("\nYou: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let prompt = input.trim_end_matches(['\r', '\n']);

        if prompt.trim().eq_ignore_ascii_case("x") {
            break;
        }

        if prompt.trim() == RELOAD_COMMAND {
            match load_catalogue(&config.catalogue_path) {
                Ok(catalogue) => {
                    let intents = catalogue.len();
                    conversation.reload(catalogue);
                    println!("Reloaded {} intents.", intents);
                }
                Err(e) => println!("Reload failed, keeping current intents: {}", e),
            }
            continue;
        }

        let result = rt.block_on(conversation.respond(prompt));
        println!("Bot: {}", result.display_text());
    }

    tracing::info!(session = %conversation.id(), "Session ended");
    Ok(())
}

/// Config file first, then command-line overrides
fn build_config(args: &Args) -> Result<AssistantConfig> {
    let mut config = match &args.config {
        Some(path) => AssistantConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => {
            AssistantConfig::load(Path::new(DEFAULT_CONFIG))?
        }
        None => AssistantConfig::default(),
    };

    if let Some(path) = &args.catalogue {
        config.catalogue_path = path.clone();
    }
    if let Some(path) = &args.transcript {
        config.transcript_path = Some(path.clone());
    }
    if args.no_transcript {
        config.transcript_path = None;
    }
    if args.speak {
        config.speak = true;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(ms) = args.timeout_ms {
        config.handler_timeout_ms = ms;
    }

    config.validate()?;
    Ok(config)
}
