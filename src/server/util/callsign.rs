//! Callsign decomposition and matching.
//!
//! Live callsigns look like `DAL1234 Heavy`, `Delta 1234` or `DAL FLIGHT OF 2`. They are split
//! into a trailing *variable* token, a leading *prefix* and a recognised *suffix*; VA rosters
//! and pilot lookups match on those parts.

use std::sync::LazyLock;

use regex::Regex;

static FLIGHT_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+FLIGHT\s+OF\s+(\d+)$").expect("flight-of pattern is a valid regex")
});

/// Parts of a live callsign
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallsignParts {
    pub variable: String,
    pub prefix: String,
    /// Canonical suffix: `Heavy`, `Super`, `Flight of N` or empty
    pub suffix: String,
}

impl CallsignParts {
    pub fn new(
        variable: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Prefix and variable joined without whitespace, e.g. `Delta 12` -> `Delta12`
    pub fn body(&self) -> String {
        let mut body: String = self.prefix.split_whitespace().collect();
        body.push_str(&self.variable);
        body
    }
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    let tail = value.get(split..)?;

    tail.eq_ignore_ascii_case(suffix).then(|| &value[..split])
}

/// Splits a raw callsign into `(variable, prefix, suffix)`.
///
/// # Rules
/// - A trailing ` HEAVY`, ` SUPER` or ` FLIGHT OF <n>` (any case) becomes the suffix
/// - The remainder is split on whitespace: the last token is the variable, everything before
///   it the prefix
/// - A single token made of letters followed by a digit (`DAL1234`) is split at the first digit
///
/// # Example
/// ```
/// use crewdesk::server::util::callsign::{split_callsign, CallsignParts};
///
/// assert_eq!(split_callsign("DAL1234 Heavy"), CallsignParts::new("1234", "DAL", "Heavy"));
/// assert_eq!(split_callsign("DAL FLIGHT OF 2"), CallsignParts::new("DAL", "", "Flight of 2"));
/// ```
pub fn split_callsign(raw: &str) -> CallsignParts {
    let trimmed = raw.trim();

    let (rest, suffix) = if let Some(rest) = strip_suffix_ignore_case(trimmed, " HEAVY") {
        (rest, "Heavy".to_string())
    } else if let Some(rest) = strip_suffix_ignore_case(trimmed, " SUPER") {
        (rest, "Super".to_string())
    } else if let Some(captures) = FLIGHT_OF.captures(trimmed) {
        let start = captures.get(0).map_or(trimmed.len(), |m| m.start());
        let count = captures.get(1).map_or("", |m| m.as_str());
        (&trimmed[..start], format!("Flight of {}", count))
    } else {
        (trimmed, String::new())
    };

    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let (variable, prefix) = match tokens.as_slice() {
        [] => (String::new(), String::new()),
        [single] => split_single_token(single),
        [leading @ .., last] => (last.to_string(), leading.join(" ")),
    };

    CallsignParts {
        variable,
        prefix,
        suffix,
    }
}

/// `DAL1234` -> (`1234`, `DAL`); tokens without a letters-then-digit shape stay whole
fn split_single_token(token: &str) -> (String, String) {
    let letters = token
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(token.len());

    match token[letters..].chars().next() {
        Some(c) if letters > 0 && c.is_ascii_digit() => {
            (token[letters..].to_string(), token[..letters].to_string())
        }
        _ => (token.to_string(), String::new()),
    }
}

/// Whether `variable` starts with `prefix` and ends with `suffix`, ignoring case.
///
/// An empty prefix or suffix does not constrain that side.
pub fn match_callsign_var(variable: &str, prefix: &str, suffix: &str) -> bool {
    let variable = variable.to_lowercase();
    let prefix = prefix.trim().to_lowercase();
    let suffix = suffix.trim().to_lowercase();

    (prefix.is_empty() || variable.starts_with(&prefix))
        && (suffix.is_empty() || variable.ends_with(&suffix))
}

/// Strength of a live flight's match against a pilot's stored callsign, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CallsignMatch {
    /// Whole callsign equals VA prefix + pilot callsign + VA suffix
    Pattern,
    /// Variable alone equals VA prefix + pilot callsign + VA suffix
    Concatenated,
    /// Variable equals the bare pilot callsign
    Bare,
}

/// Matches a live callsign against a pilot's stored per-VA callsign
pub fn match_pilot_callsign(
    parts: &CallsignParts,
    pilot_callsign: &str,
    va_prefix: &str,
    va_suffix: &str,
) -> Option<CallsignMatch> {
    let pilot_callsign = pilot_callsign.trim();
    if pilot_callsign.is_empty() || parts.variable.is_empty() {
        return None;
    }

    let expected = format!("{}{}{}", va_prefix.trim(), pilot_callsign, va_suffix.trim());

    if parts.body().eq_ignore_ascii_case(&expected) {
        Some(CallsignMatch::Pattern)
    } else if parts.variable.eq_ignore_ascii_case(&expected) {
        Some(CallsignMatch::Concatenated)
    } else if parts.variable.eq_ignore_ascii_case(pilot_callsign) {
        Some(CallsignMatch::Bare)
    } else {
        None
    }
}
