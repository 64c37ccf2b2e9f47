//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "murmur",
    version,
    about = "Record your voice and transcribe it through a remote service",
    long_about = "Record from the microphone (or upload an audio file), send it to the \
                  transcription service, and manage your saved transcript history."
)]
pub struct Cli {
    /// Print diagnostic output
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record from the microphone and transcribe (the default)
    Record(RecordArgs),

    /// Transcribe an existing audio file
    File(FileArgs),

    /// Manage saved transcripts
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Translate text into another language
    Translate {
        /// Text to translate
        text: String,

        /// Target language code (defaults to the configured target)
        #[arg(long)]
        to: Option<String>,
    },

    /// Log in to the transcription service
    Login,

    /// Log out and forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List audio input devices
    Devices,

    /// Interactive first-time setup
    Setup,

    /// Show or change settings
    Config(ConfigArgs),
}

#[derive(Args, Default)]
pub struct RecordArgs {
    /// Save the transcript to history after transcription
    #[arg(long)]
    pub save: bool,

    /// Also write the recorded audio to a local WAV file
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Microphone device name (overrides the configured device)
    #[arg(long)]
    pub device: Option<String>,

    /// Language hint for transcription (overrides the configured language)
    #[arg(long)]
    pub language: Option<String>,
}

#[derive(Args)]
pub struct FileArgs {
    /// Audio file to transcribe (wav, mp3, m4a, ogg, flac, webm, aac, opus)
    pub path: PathBuf,

    /// Save the transcript to history after transcription
    #[arg(long)]
    pub save: bool,

    /// Language hint for transcription
    #[arg(long)]
    pub language: Option<String>,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List saved transcripts
    List,

    /// Save a transcript text to history
    Save {
        /// Text to save
        text: String,
    },

    /// Delete one saved transcript by id
    Delete {
        /// Record id as shown by `history list`
        id: String,
    },

    /// Delete the entire history
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Download the history as a document
    Download {
        /// Export format: txt or pdf
        #[arg(long, default_value = "txt")]
        format: String,

        /// Output file (defaults to history.<format>)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Base URL of the transcription service
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Language hint for transcription (empty string clears it)
    #[arg(long)]
    pub language: Option<String>,

    /// Microphone device name (empty string resets to system default)
    #[arg(long)]
    pub device: Option<String>,

    /// Default target language for translations
    #[arg(long)]
    pub target_lang: Option<String>,
}
