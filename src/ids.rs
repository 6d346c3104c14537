//! Resolution of user-supplied folder and drive references.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DriveError, Result};

/// Drive web links that embed an object ID: folder views (optionally under
/// `/u/<n>/`), file views and legacy `open?id=` links.
static DRIVE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://drive\.google\.com/(?:drive/(?:u/\d+/)?folders/|file/d/|open\?id=)([A-Za-z0-9_-]+)",
    )
    .expect("Invalid Drive link regex")
});

static RAW_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid ID regex"));

/// Resolve a Drive object ID from a web link or a bare ID.
///
/// ```
/// use drive_tree::ids::extract_id;
///
/// let id = extract_id("https://drive.google.com/drive/u/1/folders/0AbC-9").unwrap();
/// assert_eq!(id, "0AbC-9");
/// assert_eq!(extract_id(" 0AbC-9 ").unwrap(), "0AbC-9");
/// ```
pub fn extract_id(url_or_id: &str) -> Result<String> {
    let trimmed = url_or_id.trim();

    if let Some(id) = DRIVE_LINK.captures(trimmed).and_then(|c| c.get(1)) {
        return Ok(id.as_str().to_string());
    }
    if RAW_ID.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(DriveError::InvalidUrlOrId(url_or_id.to_string()))
}
