//! Helpers for keeping secrets out of logs.

use std::fmt::{Debug, Formatter};

/// Redact wraps a secret so that its `Debug` output is safe to log.
///
/// Secrets of at least 12 bytes keep their first and last three characters
/// so two keys can still be told apart; shorter ones are fully masked.
/// A missing or empty secret prints `EMPTY`.
///
/// ```
/// use volcsign_core::utils::Redact;
///
/// assert_eq!(format!("{:?}", Redact::from("AKLTYjVlNDQ0ZTk4OTQ")), "AKL***OTQ");
/// assert_eq!(format!("{:?}", Redact::from(&None)), "EMPTY");
/// ```
#[derive(Clone, Copy)]
pub struct Redact<'a>(Option<&'a str>);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(Some(value))
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(Some(value))
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let v = match self.0 {
            None | Some("") => return f.write_str("EMPTY"),
            Some(v) => v,
        };

        let tail = v.len().saturating_sub(3);
        match (v.get(..3), v.get(tail..)) {
            (Some(head), Some(last)) if v.len() >= 12 => write!(f, "{head}***{last}"),
            _ => f.write_str("***"),
        }
    }
}
