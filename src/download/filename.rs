//! Filename derivation for downloads.
//!
//! Resolution order for a download without an explicit name:
//! 1. `Content-Disposition` header (`filename*=` then `filename=`)
//! 2. Last segment of the final response URL path
//! 3. [`DEFAULT_FILENAME`]
//!
//! Header and URL derived names are percent-decoded and reduced to their
//! basename. Explicit names never pass through here.

use url::Url;

use super::constants::DEFAULT_FILENAME;

/// Picks the output filename from response metadata.
///
/// Always returns a non-empty name.
pub(crate) fn derive_filename(content_disposition: Option<&str>, final_url: &Url) -> String {
    content_disposition
        .and_then(filename_from_content_disposition)
        .or_else(|| filename_from_url(final_url))
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

/// Extracts and decodes the filename from a raw `Content-Disposition` value.
///
/// Handles:
/// - `attachment; filename="example.pdf"`
/// - `attachment; filename=example.pdf`
/// - `attachment; filename=file%20name.pdf` (percent-decoded)
/// - `attachment; filename*=UTF-8''example.pdf` (RFC 5987, preferred when present)
pub(crate) fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    // The first element is the disposition type; parameters follow.
    for param in split_params(header).into_iter().skip(1) {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();

        if name == "filename*" {
            if let Some(decoded) = decode_ext_value(value).and_then(|v| basename(&v)) {
                return Some(decoded);
            }
        } else if name == "filename" && plain.is_none() {
            let unquoted = unquote(value);
            plain = basename(&percent_decode(&unquoted));
        }
    }

    plain
}

/// Returns the decoded last path segment of `url`, if it is non-empty.
pub(crate) fn filename_from_url(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }
    basename(&percent_decode(last))
}

/// Splits a header value on `;`, leaving separators inside quoted strings alone.
fn split_params(header: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (idx, ch) in header.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                parts.push(header[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(header[start..].trim());
    parts
}

/// Strips surrounding double quotes and resolves backslash escapes.
fn unquote(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return value.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Decodes an RFC 5987 `charset'language'value` string.
///
/// Only UTF-8 and ISO-8859-1 charsets are understood.
fn decode_ext_value(value: &str) -> Option<String> {
    let value = unquote(value);
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?.to_ascii_lowercase();
    let _language = parts.next()?;
    let encoded = parts.next()?;

    let bytes = urlencoding::decode_binary(encoded.as_bytes());
    match charset.as_str() {
        "utf-8" => String::from_utf8(bytes.into_owned()).ok(),
        "iso-8859-1" => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        _ => None,
    }
}

/// Percent-decodes `value`; invalid UTF-8 sequences become U+FFFD.
fn percent_decode(value: &str) -> String {
    let bytes = urlencoding::decode_binary(value.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Keeps the part after the last path separator.
///
/// Returns `None` when nothing usable is left (empty, `.` or `..`).
fn basename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if base.is_empty() || base == "." || base == ".." {
        None
    } else {
        Some(base.to_string())
    }
}
