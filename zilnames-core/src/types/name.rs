//! Human-readable names.
//!
//! A [`Name`] can only be obtained through [`Name::parse`], which applies the
//! normalization every namehash input must go through: trim, Unicode NFC,
//! lower-casing, then per-label character validation. Two spellings that
//! normalize to the same string are the same name (and the same cache key).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, ZilnamesError};

/// Characters that render as (or act as) label separators or are invisible.
const DISALLOWED_CHARS: &[char] = &[
    '\u{3002}', // ideographic full stop
    '\u{FF0E}', // fullwidth full stop
    '\u{FF61}', // halfwidth ideographic full stop
    '\u{200B}', // zero width space
    '\u{2060}', // word joiner
    '\u{FEFF}', // zero width no-break space
];

/// A normalized, dot-delimited name such as `darthgus.zil`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    /// Normalizes and validates a user-supplied name.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ZilnamesError::EmptyInput);
        }

        let normalized: String = trimmed.nfc().flat_map(char::to_lowercase).collect();

        for label in normalized.split('.') {
            validate_label(label)?;
        }

        Ok(Self(normalized))
    }

    /// The normalized string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Labels from left to right.
    pub fn labels(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.split('.')
    }

    /// Returns true if the name sits strictly below `suffix`
    /// (`alice.test.zil` has suffix `test.zil`; `test.zil` does not).
    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.0
            .strip_suffix(suffix)
            .and_then(|rest| rest.strip_suffix('.'))
            .is_some_and(|rest| !rest.is_empty())
    }

    /// Consumes the name, returning the normalized string.
    pub fn into_string(self) -> String {
        self.0
    }
}

fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(ZilnamesError::InvalidName("empty label".into()));
    }

    // Underscores are only allowed as a leading run.
    let body = label.trim_start_matches('_');
    if body.contains('_') {
        return Err(ZilnamesError::InvalidName(format!(
            "underscore allowed only at start of label: {label}"
        )));
    }

    // ASCII labels may not carry the punycode "--" marker at positions 3-4.
    if label.is_ascii() && label.len() >= 4 && &label[2..4] == "--" {
        return Err(ZilnamesError::InvalidName(format!(
            "invalid label extension: {label}"
        )));
    }

    for c in label.chars() {
        let allowed = if c.is_ascii() {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'
        } else {
            !c.is_whitespace() && !c.is_control() && !DISALLOWED_CHARS.contains(&c)
        };
        if !allowed {
            return Err(ZilnamesError::InvalidName(format!(
                "disallowed character {c:?} in label {label}"
            )));
        }
    }

    Ok(())
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl FromStr for Name {
    type Err = ZilnamesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Name::parse(&s).map_err(serde::de::Error::custom)
    }
}
