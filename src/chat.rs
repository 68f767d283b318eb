use serde::Serialize;

use crate::VideoRecord;
use crate::backend::format_text;

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Assistant,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub speaker: Speaker,
    pub text: String,
}

/// Conversation history about a single video
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
}

impl ChatSession {
    pub fn new(record: &VideoRecord) -> Self {
        Self {
            messages: vec![Message {
                speaker: Speaker::Assistant,
                text: welcome(&record.details.title, &record.details.creator),
            }],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Record a question. Blank input is ignored and yields `None`.
    pub fn push_question(&mut self, input: &str) -> Option<String> {
        let question = input.trim();
        if question.is_empty() {
            return None;
        }
        self.messages.push(Message {
            speaker: Speaker::User,
            text: question.to_string(),
        });
        Some(question.to_string())
    }

    /// Record an answer, returning its display text
    pub fn push_answer(&mut self, answer: &str) -> &str {
        self.messages.push(Message {
            speaker: Speaker::Assistant,
            text: format_text(answer),
        });
        &self.messages[self.messages.len() - 1].text
    }
}

pub fn welcome(title: &str, creator: &str) -> String {
    format!("Welcome to this video titled {title} by {creator}, start chatting!")
}

/// Words of an answer in display order, for word-by-word reveal
pub fn answer_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{VideoDetails, extract_video_id};

    fn session() -> ChatSession {
        ChatSession::new(&VideoRecord::new(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "https://youtu.be/dQw4w9WgXcQ",
            VideoDetails {
                title: "Never Gonna Give You Up".to_string(),
                thumbnail: String::new(),
                views: "1".to_string(),
                creator: "Rick Astley".to_string(),
            },
        ))
    }

    #[test]
    fn test_welcome_message() {
        let chat = session();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].speaker, Speaker::Assistant);
        assert_eq!(
            chat.messages()[0].text,
            "Welcome to this video titled Never Gonna Give You Up by Rick Astley, start chatting!"
        );
    }

    #[test]
    fn test_blank_question_ignored() {
        let mut chat = session();
        assert_eq!(chat.push_question("   "), None);
        assert_eq!(chat.push_question(""), None);
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn test_question_and_answer() {
        let mut chat = session();
        assert_eq!(chat.push_question("  what is it about? \n"), Some("what is it about?".to_string()));
        assert_eq!(chat.push_answer(r#"It is about \"commitment\"."#), r#"It is about "commitment"."#);

        let speakers: Vec<Speaker> = chat.messages().iter().map(|m| m.speaker).collect();
        assert_eq!(speakers, vec![Speaker::Assistant, Speaker::User, Speaker::Assistant]);
    }

    #[test]
    fn test_answer_words() {
        assert_eq!(answer_words("one  two\nthree"), vec!["one", "two", "three"]);
        assert!(answer_words("").is_empty());
    }
}
