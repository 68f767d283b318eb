use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "waffle",
    about = "Chat with a video: paste a link, get a summary, ask questions",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Video link (shows recent videos if omitted or unrecognized)
    pub link: Option<String>,

    /// Re-open a recent video by its number in the list
    #[arg(short, long, conflicts_with = "link")]
    pub pick: Option<usize>,

    /// Summarize the video and start asking questions about it
    #[arg(short, long)]
    pub chat: bool,

    /// Output format: text (default), json
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Show resolution details
    #[arg(short, long)]
    pub verbose: bool,
}
