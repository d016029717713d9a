// LeadDesk - core/phone.rs
//
// Phone number canonicalisation applied at import time.
// Core layer: pure string logic.

/// Canonicalise a raw phone cell to `+<digits>` form.
///
/// All non-digit characters are stripped, then:
/// - 10 digits: `+1` prefix (North American number without country code)
/// - 11 digits starting with `1`: `+` prefix
/// - anything else: `+1` prefix onto whatever digits remain
///
/// The last branch is lossy: malformed input still yields a value (e.g.
/// `"123"` becomes `"+1123"`, an empty cell becomes `"+1"`) and the row is
/// never rejected. Note that it is not idempotent for such values.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 11 && digits.starts_with('1') {
        format!("+{digits}")
    } else {
        // Covers the 10-digit case and the lossy fallback alike.
        format!("+1{digits}")
    }
}

/// True when `phone` is in one of the two canonical shapes
/// (`+1` followed by exactly 10 digits).
pub fn is_canonical(phone: &str) -> bool {
    phone
        .strip_prefix("+1")
        .is_some_and(|rest| rest.len() == 10 && rest.chars().all(|c| c.is_ascii_digit()))
}
