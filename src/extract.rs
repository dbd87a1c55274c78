use tracing::warn;

/// Why a tag could not be extracted from a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagError {
    /// The open tag does not occur in the fragment.
    Missing,
    /// The close tag is absent, or does not come strictly after the
    /// open tag's end (zero-length or inverted span).
    Malformed,
}

/// Returns exactly the bytes between the first occurrence of `open` and
/// the first occurrence of `close` after it. No trimming, no unescaping.
///
/// Missing and malformed tags are distinguished so operators can tell an
/// absent field from corrupt markup in the logs.
pub fn extract_tag<'a>(fragment: &'a str, open: &str, close: &str) -> Result<&'a str, TagError> {
    let start = match fragment.find(open) {
        Some(pos) => pos + open.len(),
        None => {
            warn!(tag = open, "missing tag");
            return Err(TagError::Missing);
        }
    };

    match fragment[start..].find(close) {
        Some(0) | None => {
            warn!(tag = close, "malformed tag");
            Err(TagError::Malformed)
        }
        Some(rel) => Ok(&fragment[start..start + rel]),
    }
}
