//! Stateless validation and formatting helpers shared by the catalog and
//! admission logic.
//!
//! Everything here is a pure function with no hidden state.

use std::borrow::Cow;

/// Marker appended to truncated strings.
pub const ELLIPSIS: &str = "...";

/// Light email heuristic.
///
/// Accepts an address when:
///
/// - it is at least 6 bytes long
/// - it contains exactly one `@`, not at position 0
/// - some `.` occurs at least two positions after the `@`
/// - that `.` is not the final character
///
/// This is deliberately not RFC 5322 validation. Callers rely on the exact
/// accept/reject set, so do not tighten it.
///
/// # Examples
///
/// ```
/// use rsvp_core::validation::is_valid_email;
///
/// assert!(is_valid_email("a@b.co"));
/// assert!(!is_valid_email("a@@b.co"));
/// assert!(!is_valid_email("ab.cd@e"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 6 {
        return false;
    }

    let mut at: Option<usize> = None;
    let mut dot: Option<usize> = None;

    for (i, ch) in email.char_indices() {
        if ch == '@' {
            if at.is_some() {
                return false;
            }
            at = Some(i);
        }
        if ch == '.' && at.is_some_and(|at| i > at + 1) {
            dot = Some(i);
        }
    }

    match (at, dot) {
        (Some(at), Some(dot)) => at > 0 && dot > at + 1 && dot < email.len() - 1,
        _ => false,
    }
}

/// Shorten `s` to at most `max` characters for display.
///
/// Strings longer than `max` are cut to `max - 3` characters and suffixed with
/// [`ELLIPSIS`]. Shorter strings are returned unchanged (borrowed).
///
/// Lengths are counted in `char`s so multi-byte text is never split inside a
/// code point. A `max` below 3 clamps the kept prefix to zero characters.
///
/// # Examples
///
/// ```
/// use rsvp_core::validation::truncate;
///
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("hi", 8), "hi");
/// ```
#[must_use]
pub fn truncate(s: &str, max: usize) -> Cow<'_, str> {
    if s.chars().count() <= max {
        return Cow::Borrowed(s);
    }

    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

/// Trim `s` and map blank input to `None`.
///
/// Used for optional text columns, which are stored as `NULL` rather than an
/// empty string.
#[must_use]
pub fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(ToOwned::to_owned)
}

/// Parse a path identifier. Only strictly positive integers are accepted.
#[must_use]
pub fn parse_positive_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}
