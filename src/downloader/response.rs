use crate::constants::{DOWNLOAD_LIMIT_MARKER, NO_PERMISSION_MARKER};

/// Number of leading body bytes needed to recognise any sentinel.
pub const SENTINEL_PEEK_LEN: usize = max_len(DOWNLOAD_LIMIT_MARKER, NO_PERMISSION_MARKER);

const fn max_len(a: &str, b: &str) -> usize {
    if a.len() > b.len() {
        a.len()
    } else {
        b.len()
    }
}

/// What a response body turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// The daily quota for this token is used up
    LimitExceeded,
    /// The token may not download this database
    PermissionDenied,
    /// Anything else; treated as the ZIP payload
    Archive,
}

/// Classifies a body from its first bytes.
///
/// `prefix` holds the leading bytes of the body and `complete` tells whether
/// it is the whole body. The quota marker only has to open the body; the
/// permission marker must be the entire body.
pub fn classify_body(prefix: &[u8], complete: bool) -> BodyKind {
    if prefix.starts_with(DOWNLOAD_LIMIT_MARKER.as_bytes()) {
        BodyKind::LimitExceeded
    } else if complete && prefix == NO_PERMISSION_MARKER.as_bytes() {
        BodyKind::PermissionDenied
    } else {
        BodyKind::Archive
    }
}
