use assistant_voice::domain::speech::{NoProgress, SpeechService};
use assistant_voice::domain::voices::{
    is_beta_language, supported_languages, VoiceCatalogService, VoiceFilter, AUDITION_TEXT,
};
use assistant_voice::error::{AppError, AppResult};
use assistant_voice::infrastructure::audio::RodioAudioEngine;
use assistant_voice::infrastructure::config::{Config, LogFormat};
use assistant_voice::infrastructure::repositories::{SpeechifyTtsRepository, TtsRepository};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "assistant-voice", about = "Speak assistant responses through Speechify")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Speak each line read from stdin, or a single text
    Speak {
        #[arg(long)]
        text: Option<String>,
    },
    /// List voices, optionally only those supporting a locale
    Voices {
        #[arg(long)]
        language: Option<String>,
    },
    /// Print the model ids of voices matching all criteria
    Filter {
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        locale: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Synthesize sample text with a voice into a file
    Audition {
        voice_id: String,
        #[arg(long, default_value = AUDITION_TEXT)]
        text: String,
        #[arg(long, default_value = "test_audio.mp3")]
        output: PathBuf,
    },
    /// Print the languages the synthesis models accept
    Languages,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        base_url = %config.speechify_base_url,
        has_token = config.speechify_token.is_some(),
        voice = config.assistant_voice.as_deref().unwrap_or("<default>"),
        "Starting assistant voice"
    );

    if config.speechify_token.is_none() {
        tracing::warn!("SPEECHIFY_TOKEN not set; synthesis will fail and voice listings will be empty");
    }

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    let tts_repo: Arc<dyn TtsRepository> = Arc::new(SpeechifyTtsRepository::new(
        config.speechify_base_url.clone(),
        config.speechify_token.clone(),
    ));
    let catalog = Arc::new(VoiceCatalogService::new(tts_repo.clone()));

    match cli.command.unwrap_or(Command::Speak { text: None }) {
        Command::Speak { text } => {
            let mut speech = SpeechService::new(
                config.clone(),
                tts_repo,
                catalog,
                Box::new(RodioAudioEngine::new()),
            );
            match text {
                Some(text) => {
                    speech.try_text_to_speech(&text, &mut NoProgress).await?;
                }
                None => speak_stdin(&mut speech).await?,
            }
        }
        Command::Voices { language } => {
            match language {
                Some(locale) => {
                    let voices = catalog.list_voices_by_language(&locale).await;
                    println!("Found {} voices for {}:", voices.len(), locale);
                    for (i, voice) in voices.iter().enumerate() {
                        println!("  {}. {} ({}) - ID: {}", i + 1, voice.name, voice.gender, voice.voice_id);
                    }
                }
                None => {
                    for voice in catalog.list_voices().await {
                        println!("{}\t{}\t{}", voice.id, voice.display_name, voice.gender);
                    }
                }
            }
        }
        Command::Filter { gender, locale, tags } => {
            let filter = VoiceFilter { gender, locale, tags };
            for model in catalog.filter_voices(&filter).await {
                println!("{}", model);
            }
        }
        Command::Audition { voice_id, text, output } => {
            if voice_id.trim().is_empty() {
                return Err(AppError::BadRequest("voice id must not be empty".to_string()));
            }
            catalog.try_audition_voice(&voice_id, &text, &output).await?;
            println!("Audio saved to: {}", output.display());
        }
        Command::Languages => {
            for (name, code) in supported_languages() {
                let beta = if is_beta_language(code) { " (beta)" } else { "" };
                println!("  {}: {}{}", name, code, beta);
            }
        }
    }

    Ok(())
}

async fn speak_stdin(speech: &mut SpeechService) -> AppResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("Enter the text: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        if !speech.text_to_speech(&line, &mut NoProgress).await {
            tracing::error!("Speech gave up; check the Speechify credential");
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "assistant_voice=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "assistant_voice=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
