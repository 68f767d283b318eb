use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, eyre};
use log::{debug, info, warn};

use waffle::VideoRecord;
use waffle::backend::{Backend, Digest};
use waffle::chat::{ChatSession, answer_words};
use waffle::config::Config;
use waffle::output;
use waffle::recent::RecentItems;
use waffle::storage::{FileStorage, Storage};

mod cli;

use cli::{Cli, OutputFormat};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("waffle.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    waffle::storage::default_data_dir().join("logs")
}

fn build_after_help() -> String {
    format!(
        "\nConfig is read from: {}\nLogs are written to: {}",
        waffle::config::config_path().display(),
        log_dir().join("waffle.log").display()
    )
}

/// Retry an async operation with exponential backoff
async fn retry<F, Fut, T>(max_attempts: u32, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut last_err = None;
    for attempt in 0..max_attempts {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(e) => {
                if attempt + 1 < max_attempts {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    debug!("Attempt {} failed: {e}, retrying in {delay:?}", attempt + 1);
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| eyre!("no attempts made")))
}

fn print_recent<S: Storage>(recent: &RecentItems<S>, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => output::render_recent_text(recent.all()),
        OutputFormat::Json => output::render_recent_json(recent.all())?,
    };
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring invalid config: {e}");
        Config::default()
    });

    // CLI flag beats config, text otherwise
    let format = cli
        .format
        .or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(|f| <OutputFormat as clap::ValueEnum>::from_str(f, true).ok())
        })
        .unwrap_or(OutputFormat::Text);

    let storage = FileStorage::new(config.data_dir());
    if cli.verbose {
        eprintln!("Recent videos: {}", storage.dir().display());
    }
    let mut recent = RecentItems::load(storage);

    let input = match cli.pick {
        Some(number) => recent
            .pick(number)
            .map(|r| r.source_link.clone())
            .ok_or_else(|| eyre!("no recent video #{number} ({} stored)", recent.all().len()))?,
        None => cli.link.clone().unwrap_or_default(),
    };

    let Some(video_id) = waffle::extract_video_id(&input) else {
        if !input.trim().is_empty() {
            info!("Not a recognized video link: {input}");
            if cli.verbose {
                eprintln!("Not a recognized video link: {input}");
            }
        }
        return print_recent(&recent, format);
    };
    debug!("Resolved {input} to {video_id}");

    let api_key = config
        .api_key()
        .ok_or_else(|| eyre!("YOUTUBE_API_KEY environment variable not set (required for video details)"))?;

    let client = reqwest::Client::new();

    let details = retry(3, || {
        let client = &client;
        let api_key = &api_key;
        let video_id = &video_id;
        async move { waffle::metadata::fetch_details(client, api_key, video_id).await }
    })
    .await;

    let details = match details {
        Ok(Some(details)) => details,
        Ok(None) => {
            warn!("No video details found for {video_id}");
            if cli.verbose {
                eprintln!("No video details found for {video_id}");
            }
            return print_recent(&recent, format);
        }
        Err(e) => {
            warn!("Failed to fetch video details: {e}");
            eprintln!("Failed to fetch video details: {e}");
            return print_recent(&recent, format);
        }
    };

    let record = VideoRecord::new(video_id, input, details);
    recent.record_if_absent(record.clone());

    let rendered = match format {
        OutputFormat::Text => output::render_video_text(&record),
        OutputFormat::Json => output::render_video_json(&record)?,
    };
    println!("{rendered}");

    if !cli.chat {
        if cli.verbose {
            eprintln!("Run again with --chat to summarize and ask questions");
        }
        return Ok(());
    }

    let backend = Backend::new(client.clone(), config.backend_url());
    run_chat(&backend, &record, format, config.reveal_delay()).await
}

async fn run_chat(backend: &Backend, record: &VideoRecord, format: OutputFormat, reveal_delay: Duration) -> Result<()> {
    let mut session = ChatSession::new(record);
    if format == OutputFormat::Text {
        println!("\n{}", session.messages()[0].text);
    }

    let digest: Digest = retry(3, || {
        let video_id = &record.identifier;
        async move { backend.digest(video_id).await }
    })
    .await
    .map_err(|e| e.wrap_err("could not summarize video"))?;

    let rendered = match format {
        OutputFormat::Text => output::render_digest_text(&digest),
        OutputFormat::Json => output::render_digest_json(&digest)?,
    };
    println!("\n{rendered}\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if format == OutputFormat::Text {
            print!("> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let Some(question) = session.push_question(&line?) else {
            continue;
        };

        let answer = match backend.ask(&digest.transcript, &question).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Question failed: {e}");
                eprintln!("Could not get an answer: {e}");
                continue;
            }
        };
        let answer = session.push_answer(&answer).to_string();

        match format {
            OutputFormat::Text => reveal(&answer, reveal_delay).await?,
            OutputFormat::Json => {
                let message = &session.messages()[session.messages().len() - 1];
                println!("{}", serde_json::to_string(message)?);
            }
        }
    }

    debug!("Chat ended after {} messages", session.messages().len());
    Ok(())
}

/// Print an answer one word at a time
async fn reveal(answer: &str, delay: Duration) -> Result<()> {
    let mut stdout = io::stdout();
    for (i, word) in answer_words(answer).into_iter().enumerate() {
        if i > 0 {
            write!(stdout, " ")?;
        }
        write!(stdout, "{word}")?;
        stdout.flush()?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    writeln!(stdout)?;
    Ok(())
}
