//! Cell-level parsing for phone, ZIP, do-not-call, and email columns.
//!
//! Lead exports are frequently round-tripped through spreadsheets, so
//! numeric-looking cells come back as floats (`"5551234567.0"`) and
//! ZIP codes lose their leading zeros (`"2134"`). These helpers undo that.

use sha2::{Digest, Sha256};

/// Strips a trailing `.0` left by a float export.
fn strip_float_suffix(value: &str) -> &str {
    value.strip_suffix(".0").unwrap_or(value)
}

/// Formats a US phone number as `(AAA) BBB-CCCC`.
///
/// Extensions (`x12`, `ext. 12`, `#12`) are ignored, a leading country
/// code `1` is dropped, and anything that is not exactly ten digits after
/// that is rejected.
#[must_use]
pub fn format_phone(raw: &str) -> Option<String> {
    let trimmed = strip_float_suffix(raw.trim());

    let mut digits = String::with_capacity(11);
    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else if matches!(ch, 'x' | 'X' | '#' | ';' | ',' | 'e' | 'E') {
            break;
        }
    }

    let national = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('1') => &digits[1..],
        _ => return None,
    };

    Some(format!(
        "({}) {}-{}",
        &national[..3],
        &national[3..6],
        &national[6..]
    ))
}

/// Reduces a ZIP cell to its five-digit ZIP.
///
/// Accepts `62701`, `62701-1234`, `627011234`, `62701.0`, and restores
/// leading zeros dropped by spreadsheets (`2134` → `02134`).
#[must_use]
pub fn zip5(raw: &str) -> Option<String> {
    let trimmed = strip_float_suffix(raw.trim());
    let base = trimmed.split('-').next().unwrap_or(trimmed);
    if base.is_empty() || !base.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match base.len() {
        3 | 4 => Some(format!("{base:0>5}")),
        5 => Some(base.to_string()),
        9 => Some(base[..5].to_string()),
        _ => None,
    }
}

/// Whether a do-not-call cell forbids dialing. Missing means allowed.
#[must_use]
pub fn is_do_not_call(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("Y"))
}

/// Lowercase hex SHA-256 of an email address, trimmed and lowercased
/// first so hashes match what ad platforms compute.
#[must_use]
pub fn sha256_email(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    hex::encode(Sha256::digest(normalized.as_bytes()))
}
