use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of a canonical video identifier
pub const VIDEO_ID_LEN: usize = 11;

/// Characters that end a token: query separators and fragments
const TOKEN_TERMINATORS: [char; 3] = ['?', '&', '#'];

/// Canonical 11-character video identifier.
///
/// Only produced by [`extract_video_id`], or by deserializing a value that
/// passes the same token check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct VideoId(String);

impl VideoId {
    fn parse(token: &str) -> Option<Self> {
        is_video_id(token).then(|| VideoId(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_video_id(&value) {
            Ok(VideoId(value))
        } else {
            Err(format!("invalid video identifier: {value:?}"))
        }
    }
}

/// Markers that precede a video identifier, in precedence order for a
/// single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `youtu.be/ID`
    ShortLink,
    /// `/v/ID`
    V,
    /// `u/<c>/ID`, where `<c>` is a single identifier character
    UserUpload,
    /// `embed/ID`
    Embed,
    /// `watch?v=ID`
    Watch,
    /// `&v=ID`
    VParam,
    /// `shorts/ID`
    Shorts,
    /// `live/ID`
    Live,
}

const MARKERS: [Marker; 8] = [
    Marker::ShortLink,
    Marker::V,
    Marker::UserUpload,
    Marker::Embed,
    Marker::Watch,
    Marker::VParam,
    Marker::Shorts,
    Marker::Live,
];

impl Marker {
    fn literal(self) -> &'static str {
        match self {
            Marker::ShortLink => "youtu.be/",
            Marker::V => "v/",
            Marker::UserUpload => "u/",
            Marker::Embed => "embed/",
            Marker::Watch => "watch?v=",
            Marker::VParam => "&v=",
            Marker::Shorts => "shorts/",
            Marker::Live => "live/",
        }
    }

    /// Byte length of this marker if `s` starts with it
    fn match_len(self, s: &str) -> Option<usize> {
        let literal = self.literal();
        let rest = s.strip_prefix(literal)?;
        if self != Marker::UserUpload {
            return Some(literal.len());
        }

        let mut chars = rest.chars();
        let c = chars.next()?;
        (is_id_char(c) && chars.next() == Some('/')).then(|| literal.len() + 2)
    }
}

/// The first marker found in an input, with the token that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerMatch<'a> {
    pub marker: Marker,
    pub position: usize,
    pub token: &'a str,
}

/// Find the leftmost marker in `input`.
///
/// Positions are scanned left to right. At each position the markers are
/// tried in [`Marker`] order, so the earliest marker in the string wins.
pub fn find_marker(input: &str) -> Option<MarkerMatch<'_>> {
    for (position, _) in input.char_indices() {
        let rest = &input[position..];
        for marker in MARKERS {
            if let Some(len) = marker.match_len(rest) {
                let after = &rest[len..];
                let end = after.find(&TOKEN_TERMINATORS[..]).unwrap_or(after.len());
                return Some(MarkerMatch {
                    marker,
                    position,
                    token: &after[..end],
                });
            }
        }
    }
    None
}

/// Extract the video identifier from a link.
///
/// Only the first marker counts: if the token after it is not exactly
/// [`VIDEO_ID_LEN`] identifier characters the result is `None`, even when a
/// later marker would have produced a valid one.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let found = find_marker(input.trim())?;
    VideoId::parse(found.token)
}

/// Whether `input` carries a recognizable video identifier
pub fn is_valid_link(input: &str) -> bool {
    extract_video_id(input).is_some()
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_video_id(token: &str) -> bool {
    token.len() == VIDEO_ID_LEN && token.chars().all(is_id_char)
}
