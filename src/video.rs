//! Tutorial video references.
//!
//! DESIGN
//! ======
//! The model returns a free-form YouTube URL. Only a canonical video id is
//! trusted; the embeddable player URL is rebuilt from it. URLs that yield no
//! id make the video view unavailable, which callers model as `None`.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

const SHORT_LINK_HOST: &str = "youtu.be";
const EMBED_BASE: &str = "https://www.youtube.com/embed";

static LOOSE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("video id pattern"));

/// Extract the canonical video id from a watch, short-link or embed URL.
///
/// Structured parsing wins when the input is a valid absolute URL; only
/// unparseable input falls back to pattern matching.
#[must_use]
pub fn video_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let id = match Url::parse(url) {
        Ok(parsed) => id_from_parsed(&parsed),
        Err(_) => LOOSE_ID
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned()),
    };

    id.filter(|id| !id.is_empty())
}

fn id_from_parsed(url: &Url) -> Option<String> {
    if url.host_str() == Some(SHORT_LINK_HOST) {
        return url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_owned);
    }
    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
}

/// Build the embeddable player URL for a video reference, if one can be derived.
#[must_use]
pub fn embed_url(url: &str) -> Option<String> {
    video_id(url).map(|id| format!("{EMBED_BASE}/{id}"))
}

#[cfg(test)]
#[path = "video_test.rs"]
mod tests;
