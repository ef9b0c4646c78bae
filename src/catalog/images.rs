use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::DRIVE_THUMBNAIL_WIDTH;

/// Drive share links: `/file/d/<id>/...` or any `?id=<id>` / `&id=<id>` query form
static DRIVE_FILE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://drive\.google\.com/(?:file/d/([A-Za-z0-9_-]+)|[^?#]*\?(?:[^#]*&)?id=([A-Za-z0-9_-]+))")
        .expect("drive pattern is valid")
});

/// Pull the embedded file id out of a Drive share link
pub fn drive_file_id(url: &str) -> Option<&str> {
    let caps = DRIVE_FILE_ID.captures(url.trim())?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Rewrite a Drive share link into a directly embeddable thumbnail URL.
/// Anything else is returned unchanged.
pub fn rewrite_drive_url(url: &str) -> String {
    match drive_file_id(url) {
        Some(id) => format!(
            "https://drive.google.com/thumbnail?id={}&sz={}",
            id, DRIVE_THUMBNAIL_WIDTH
        ),
        None => url.to_string(),
    }
}
