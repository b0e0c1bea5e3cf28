//! Outbound adapters implementing the domain ports.
//!
//! Adapters are thin translators owning transport details only: request
//! serialisation, timeouts, HTTP status mapping, and JSON decoding into
//! domain types. They contain no business logic.
//!
//! - **cloudant**: reqwest-backed document-store client
//! - **sendgrid**: reqwest-backed mail-delivery client

pub mod cloudant;
pub mod sendgrid;

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Compact a response body into a short single-line preview for error
/// messages.
pub(crate) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
