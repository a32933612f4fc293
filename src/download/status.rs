//! HTTP status line formatting used in error messages.

use reqwest::StatusCode;

/// Formats a status code as `"<code> <reason phrase>"`.
///
/// Codes without a standard reason phrase are rendered as the bare number,
/// e.g. `599` becomes `"599"`.
#[must_use]
pub fn status_line(code: u16) -> String {
    match StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
    {
        Some(phrase) => format!("{code} {phrase}"),
        None => code.to_string(),
    }
}
