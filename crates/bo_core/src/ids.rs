//! crates/bo_core/src/ids.rs
//! Catalog identifiers. Codes and territory keys are strict ASCII tokens;
//! town names are free text (trimmed, non-empty, bounded). No I/O.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned when validating or parsing identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier is too long")]
    TooLong,
    #[error("identifier has an invalid shape")]
    BadShape,
}

const TOKEN_MAX_LEN: usize = 64;
const TOWN_MAX_LEN: usize = 128;

/// Token for codes/keys: ^[A-Za-z0-9_.:-]{1,64}$ (ASCII only)
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let bs = s.as_bytes();
    if bs.is_empty() || bs.len() > TOKEN_MAX_LEN {
        return false;
    }
    bs.iter()
        .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':' | b'-'))
}

fn check_token(s: &str) -> Result<String, IdError> {
    if s.is_empty() {
        return Err(IdError::Empty);
    }
    if s.len() > TOKEN_MAX_LEN {
        return Err(IdError::TooLong);
    }
    if !is_valid_token(s) {
        return Err(IdError::BadShape);
    }
    Ok(s.to_owned())
}

fn check_town(s: &str) -> Result<String, IdError> {
    let t = s.trim();
    if t.is_empty() {
        return Err(IdError::Empty);
    }
    if t.chars().count() > TOWN_MAX_LEN {
        return Err(IdError::TooLong);
    }
    if t.chars().any(char::is_control) {
        return Err(IdError::BadShape);
    }
    Ok(t.to_owned())
}

macro_rules! simple_string_newtype {
    ($(#[$m:meta])* $name:ident, $check:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl FromStr for $name {
            type Err = IdError;
            #[inline]
            fn from_str(s: &str) -> Result<Self, Self::Err> { $check(s).map($name) }
        }

        impl TryFrom<&str> for $name {
            type Error = IdError;
            #[inline]
            fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;
            #[inline]
            fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
        }

        impl From<$name> for String {
            #[inline]
            fn from(value: $name) -> String { value.0 }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str { &self.0 }
        }
    };
}

simple_string_newtype!(
    /// Unique movie code: ^[A-Za-z0-9_.:-]{1,64}$
    MovieCode, check_token
);
simple_string_newtype!(
    /// Unique hero (lead performer) code: ^[A-Za-z0-9_.:-]{1,64}$
    HeroCode, check_token
);
simple_string_newtype!(
    /// Territory grouping key, e.g. `NIZAM` or `TAMIL_NADU`.
    TerritoryKey, check_token
);
simple_string_newtype!(
    /// Town display name; surrounding whitespace is trimmed.
    TownName, check_town
);
