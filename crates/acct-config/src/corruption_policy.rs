use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// What to do when the persisted user entry cannot be parsed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptionPolicy {
    /// Back up the bad entry and start without a user.
    #[default]
    Discard,
    /// Refuse to open the store.
    Fail,
}

impl fmt::Display for CorruptionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discard => f.write_str("discard"),
            Self::Fail => f.write_str("fail"),
        }
    }
}

impl FromStr for CorruptionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discard" => Ok(Self::Discard),
            "fail" => Ok(Self::Fail),
            other => Err(format!("unknown corruption policy '{other}'")),
        }
    }
}
