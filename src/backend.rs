use eyre::{Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::VideoId;

pub const DEFAULT_BACKEND_URL: &str = "https://waffle-sie7.onrender.com";

/// Number of links shown alongside a summary
const LINKS_OF_INTEREST: usize = 3;

/// Transcript, summary and related links for a video
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Digest {
    pub transcript: String,
    pub summary: String,
    pub links: Vec<String>,
}

impl Digest {
    pub fn links_of_interest(&self) -> &[String] {
        &self.links[..self.links.len().min(LINKS_OF_INTEREST)]
    }
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    answer: Option<String>,
}

/// Client for the transcription, summarization and question-answering service
#[derive(Debug, Clone)]
pub struct Backend {
    client: reqwest::Client,
    base_url: String,
}

impl Backend {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Transcribe and summarize a video
    pub async fn digest(&self, video_id: &VideoId) -> Result<Digest> {
        let watch_url = video_id.watch_url();
        debug!("Requesting digest for {watch_url}");

        let resp = self
            .client
            .get(self.endpoint("transcribe_and_summarize"))
            .query(&[("url", watch_url.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("summarization backend returned {status}: {body}");
        }

        let digest: Digest = resp.json().await?;
        debug!(
            "Digest: {} transcript chars, {} links",
            digest.transcript.len(),
            digest.links.len()
        );
        Ok(digest)
    }

    /// Ask a question about a transcript
    pub async fn ask(&self, transcript: &str, question: &str) -> Result<String> {
        debug!("Asking backend: {question}");

        let body = serde_json::json!({
            "transcription": transcript,
            "question": question,
        });

        let resp = self
            .client
            .post(self.endpoint("ask/"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("question backend returned {status}: {body}");
        }

        let json: serde_json::Value = resp.json().await?;
        extract_answer(json)
    }
}

fn extract_answer(json: serde_json::Value) -> Result<String> {
    let resp: AskResponse = serde_json::from_value(json)?;
    match resp.answer {
        Some(answer) => Ok(answer),
        None => bail!("unexpected question backend response format"),
    }
}

/// Undo escaped quotes and decode HTML entities in backend text
pub fn format_text(text: &str) -> String {
    let unescaped = text.replace("\\\"", "\"");
    html_escape::decode_html_entities(&unescaped).into_owned()
}
