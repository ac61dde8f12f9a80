use once_cell::sync::Lazy;
use regex::Regex;

/// Recognizes the id segment across the known YouTube URL shapes:
/// `watch?v=ID`, `youtu.be/ID`, `/embed/ID`, `/v/ID`, `/shorts/ID` and the
/// `&v=` continuation form. Group 2 is the candidate id, cut at `#`, `&`
/// or `?`.
static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|shorts/|watch\?v=|&v=)([^#&?]*).*$")
        .expect("video id pattern")
});

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Best-effort: rewrite any recognized YouTube URL into the embeddable
/// `/embed/{id}` form. A candidate id is only accepted at YouTube's fixed
/// length of 11 characters. Anything else, malformed or non-YouTube,
/// yields `None` rather than an error.
pub fn embed_url(url: Option<&str>) -> Option<String> {
    let url = url?.trim();
    if url.is_empty() {
        return None;
    }
    if let Some(caps) = VIDEO_ID_RE.captures(url) {
        let id = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        if id.len() == 11 {
            return Some(format!("{EMBED_BASE}{id}"));
        }
    }
    // Already an embed link; hand it back untouched.
    if url.contains("youtube.com/embed/") {
        return Some(url.to_string());
    }
    None
}
