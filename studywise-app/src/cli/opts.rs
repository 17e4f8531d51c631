use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
pub enum StoreKind {
    Json,
    Memory,
}

#[derive(Debug, Parser, Clone)]
#[command(name = "studywise", version, about = "StudyWise flashcard CLI/API")]
pub struct Cli {
    /// Storage backend (applies to CLI/API unless overridden)
    #[arg(long, value_enum, default_value_t = StoreKind::Json)]
    pub store: StoreKind,

    /// Store file path when --store json (defaults to app data dir)
    #[arg(long)]
    pub store_path: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate flashcards from text (CLI)
    Generate(GenerateCmd),
    /// Flashcard set operations (CLI)
    #[command(subcommand)]
    Sets(SetsCmd),
    /// Launch Axum HTTP API
    Api(ApiCmd),
}

#[derive(Debug, Args, Clone)]
pub struct GenerateCmd {
    /// Read source text from a file instead of stdin
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Number of cards to request (the model may return fewer or more)
    #[arg(long, default_value_t = 10)]
    pub count: u32,

    /// Save the generated cards under this set name
    #[arg(long)]
    pub save: Option<String>,

    /// Owner id recorded on the saved set (required with --save)
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum SetsCmd {
    /// List set names in a user's index
    List {
        #[arg(long)]
        user: String,
    },
    /// Print the cards of a set
    Show {
        name: String,
        /// Print as JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args, Clone)]
pub struct ApiCmd {
    /// Bind address (host:port)
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: String,
}
