pub mod backend;
pub mod chat;
pub mod config;
pub mod extract;
pub mod metadata;
pub mod output;
pub mod recent;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use extract::{VideoId, extract_video_id, is_valid_link};

/// Display metadata for a video, as returned by the metadata provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    pub thumbnail: String,
    /// View count kept as the provider's decimal string
    pub views: String,
    pub creator: String,
}

/// A resolved video, as remembered in the recent list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub identifier: VideoId,
    /// The link exactly as the user gave it
    #[serde(rename = "link")]
    pub source_link: String,
    pub details: VideoDetails,
}

impl VideoRecord {
    pub fn new(identifier: VideoId, source_link: impl Into<String>, details: VideoDetails) -> Self {
        Self {
            identifier,
            source_link: source_link.into(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization_shape() {
        let record = VideoRecord::new(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "https://youtu.be/dQw4w9WgXcQ",
            VideoDetails {
                title: "Never Gonna Give You Up".to_string(),
                thumbnail: "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string(),
                views: "1500000000".to_string(),
                creator: "Rick Astley".to_string(),
            },
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["identifier"], "dQw4w9WgXcQ");
        assert_eq!(json["link"], "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(json["details"]["title"], "Never Gonna Give You Up");

        let back: VideoRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
