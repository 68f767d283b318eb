use eyre::{Result, bail};
use log::debug;
use serde::Deserialize;

use crate::{VideoDetails, VideoId};

const VIDEOS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct Statistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}

/// Look up title, thumbnail, views and creator for a video.
///
/// Returns `Ok(None)` when the provider knows no such video.
pub async fn fetch_details(client: &reqwest::Client, api_key: &str, video_id: &VideoId) -> Result<Option<VideoDetails>> {
    debug!("Fetching video details for {video_id}");

    let resp = client
        .get(VIDEOS_ENDPOINT)
        .query(&[
            ("part", "snippet,statistics"),
            ("id", video_id.as_str()),
            ("key", api_key),
        ])
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("video metadata API returned {status}: {body}");
    }

    let body: VideosResponse = resp.json().await?;
    let details = details_from_response(body);
    if details.is_none() {
        debug!("No video details found for {video_id}");
    }
    Ok(details)
}

fn details_from_response(resp: VideosResponse) -> Option<VideoDetails> {
    let item = resp.items.into_iter().next()?;
    let Thumbnails { default, high } = item.snippet.thumbnails;
    let thumbnail = high.or(default).map(|t| t.url).unwrap_or_default();
    let views = item
        .statistics
        .and_then(|s| s.view_count)
        .unwrap_or_else(|| "0".to_string());

    Some(VideoDetails {
        title: item.snippet.title,
        thumbnail,
        views,
        creator: item.snippet.channel_title,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Option<VideoDetails> {
        details_from_response(serde_json::from_value(json).unwrap())
    }

    #[test]
    fn test_details_from_response() {
        let details = parse(serde_json::json!({
            "items": [{
                "snippet": {
                    "title": "Never Gonna Give You Up",
                    "channelTitle": "Rick Astley",
                    "thumbnails": {
                        "default": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg" },
                        "high": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg" }
                    }
                },
                "statistics": { "viewCount": "1500000000", "likeCount": "1" }
            }]
        }))
        .unwrap();

        assert_eq!(details.title, "Never Gonna Give You Up");
        assert_eq!(details.creator, "Rick Astley");
        assert_eq!(details.thumbnail, "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg");
        assert_eq!(details.views, "1500000000");
    }

    #[test]
    fn test_thumbnail_falls_back_to_default() {
        let details = parse(serde_json::json!({
            "items": [{
                "snippet": {
                    "title": "t",
                    "channelTitle": "c",
                    "thumbnails": { "default": { "url": "https://example.com/default.jpg" } }
                },
                "statistics": { "viewCount": "7" }
            }]
        }))
        .unwrap();
        assert_eq!(details.thumbnail, "https://example.com/default.jpg");
    }

    #[test]
    fn test_missing_statistics() {
        let details = parse(serde_json::json!({
            "items": [{ "snippet": { "title": "t", "channelTitle": "c" } }]
        }))
        .unwrap();
        assert_eq!(details.views, "0");
        assert_eq!(details.thumbnail, "");
    }

    #[test]
    fn test_no_items() {
        assert!(parse(serde_json::json!({ "items": [] })).is_none());
        assert!(parse(serde_json::json!({ "kind": "youtube#videoListResponse" })).is_none());
    }
}
