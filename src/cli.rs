use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "urlsum",
    about = "Summarize a YouTube video or website into bullet points",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube or website URL (reads one line from stdin if omitted)
    pub url: Option<String>,

    /// LLM model for summarization
    #[arg(short, long)]
    pub model: Option<String>,

    /// Preferred caption language for YouTube transcripts
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the summary to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show pipeline detail on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
