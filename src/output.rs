use eyre::Result;
use serde::Serialize;

use crate::VideoRecord;
use crate::backend::{Digest, format_text};

/// Render the resolved video panel as plain text
pub fn render_video_text(record: &VideoRecord) -> String {
    let details = &record.details;
    format!(
        "{}\n{}\n{} views\n{}\n{}",
        details.title,
        details.creator,
        format_views(&details.views),
        details.thumbnail,
        record.identifier.watch_url(),
    )
}

pub fn render_video_json(record: &VideoRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Render the recent videos, numbered from 1 in insertion order
pub fn render_recent_text(records: &[VideoRecord]) -> String {
    if records.is_empty() {
        return "No recent videos".to_string();
    }
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. {} ({}, {} views)\n   {}",
                i + 1,
                r.details.title,
                r.details.creator,
                format_views(&r.details.views),
                r.source_link,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_recent_json(records: &[VideoRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Render a summary and its links of interest
pub fn render_digest_text(digest: &Digest) -> String {
    let mut out = format!("summary:\n{}", format_text(&digest.summary));
    let links = digest.links_of_interest();
    if !links.is_empty() {
        out.push_str("\n\nlinks of interest:");
        for link in links {
            out.push_str("\n  ");
            out.push_str(link);
        }
    }
    out
}

#[derive(Serialize)]
struct DigestView<'a> {
    summary: String,
    links: &'a [String],
}

pub fn render_digest_json(digest: &Digest) -> Result<String> {
    let view = DigestView {
        summary: format_text(&digest.summary),
        links: digest.links_of_interest(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

/// Group a decimal view count with thousands separators.
///
/// Anything that is not a plain run of digits is returned unchanged.
pub fn format_views(views: &str) -> String {
    if views.is_empty() || !views.bytes().all(|b| b.is_ascii_digit()) {
        return views.to_string();
    }
    let digits = views.trim_start_matches('0');
    if digits.is_empty() {
        return "0".to_string();
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{VideoDetails, extract_video_id};

    fn sample_record(id: &str, title: &str) -> VideoRecord {
        let link = format!("https://www.youtube.com/watch?v={id}&t=30s");
        VideoRecord::new(
            extract_video_id(&link).unwrap(),
            link,
            VideoDetails {
                title: title.to_string(),
                thumbnail: format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg"),
                views: "1234567".to_string(),
                creator: "Rick Astley".to_string(),
            },
        )
    }

    #[test]
    fn test_format_views() {
        assert_eq!(format_views("0"), "0");
        assert_eq!(format_views("999"), "999");
        assert_eq!(format_views("1000"), "1,000");
        assert_eq!(format_views("1234567"), "1,234,567");
        assert_eq!(format_views("000123"), "123");
    }

    #[test]
    fn test_format_views_beyond_u64() {
        assert_eq!(format_views("123456789012345678901234"), "123,456,789,012,345,678,901,234");
    }

    #[test]
    fn test_format_views_non_numeric() {
        assert_eq!(format_views("n/a"), "n/a");
        assert_eq!(format_views(""), "");
    }

    #[test]
    fn test_render_video_text() {
        let record = sample_record("dQw4w9WgXcQ", "Never Gonna Give You Up");
        let output = render_video_text(&record);
        assert_eq!(
            output,
            "Never Gonna Give You Up\nRick Astley\n1,234,567 views\n\
             https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg\n\
             https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_render_recent_text() {
        let records = vec![
            sample_record("aaaaaaaaaaa", "First"),
            sample_record("bbbbbbbbbbb", "Second"),
        ];
        let output = render_recent_text(&records);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "1. First (Rick Astley, 1,234,567 views)");
        assert_eq!(lines[1], "   https://www.youtube.com/watch?v=aaaaaaaaaaa&t=30s");
        assert!(lines[2].starts_with("2. Second"));
    }

    #[test]
    fn test_render_recent_empty() {
        assert_eq!(render_recent_text(&[]), "No recent videos");
        assert_eq!(render_recent_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_render_digest_text() {
        let digest = Digest {
            transcript: "ignored".to_string(),
            summary: r#"A song about \"never\" giving up."#.to_string(),
            links: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        };
        assert_eq!(
            render_digest_text(&digest),
            "summary:\nA song about \"never\" giving up.\n\nlinks of interest:\n  a\n  b\n  c"
        );
    }

    #[test]
    fn test_render_digest_json_omits_transcript() {
        let digest = Digest {
            transcript: "long transcript".to_string(),
            summary: "short".to_string(),
            links: vec![],
        };
        let json: serde_json::Value = serde_json::from_str(&render_digest_json(&digest).unwrap()).unwrap();
        assert_eq!(json["summary"], "short");
        assert!(json.get("transcript").is_none());
    }
}
