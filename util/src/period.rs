//! Academic period identifiers.
//!
//! A period names a half-year term: `1C2024` is the first term of 2024,
//! `2C2024` the second. Only years `2000..=2099` are representable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static PERIOD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[12]C20[0-9]{2}$").expect("period pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid period '{0}'. Expected format {{1|2}}C20YY, e.g. 1C2024")]
pub struct InvalidPeriod(pub String);

/// A validated academic period such as `2C2025`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period(String);

impl Period {
    pub fn parse(raw: &str) -> Result<Self, InvalidPeriod> {
        if PERIOD_REGEX.is_match(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(InvalidPeriod(raw.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Period {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::parse(s)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Period::parse(&raw).map_err(serde::de::Error::custom)
    }
}
