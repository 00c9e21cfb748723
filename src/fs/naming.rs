//! Filename generation and sanitization.

use url::Url;

use crate::error::{Error, Result};

/// Validate and sanitize a path component (e.g. a highlight title).
///
/// Returns an error if the component contains path traversal patterns.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    // Reject null bytes
    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    // Sanitize problematic characters (replace with underscore)
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Reject empty or whitespace-only names
    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized.trim().to_string())
}

/// Derive a file extension from a media URL's path, without the dot.
///
/// Instagram CDN URLs carry the real extension before the query string.
pub fn extension_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last = parsed.path_segments()?.last()?.to_string();
    let (_, ext) = last.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > 4 {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Derive a file extension from a Content-Type header value.
pub fn extension_from_mime(mime: &str) -> Option<String> {
    let essence = mime.split(';').next()?.trim();
    // Prefer the conventional extensions over mime_guess's alphabetical pick
    match essence {
        "image/jpeg" => return Some("jpg".to_string()),
        "video/mp4" => return Some("mp4".to_string()),
        _ => {}
    }
    mime_guess::get_mime_extensions_str(essence)
        .and_then(|exts| exts.first())
        .map(|ext| ext.to_string())
}
