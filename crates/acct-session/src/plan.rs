use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Subscription tier of a user.
///
/// The French labels are accepted on input because older front-ends
/// persisted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Plan {
    #[default]
    #[serde(alias = "Gratuit")]
    Free,
    Plus,
    #[serde(alias = "Entreprise")]
    Enterprise,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Free, Plan::Plus, Plan::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "Free",
            Plan::Plus => "Plus",
            Plan::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Unknown plan '{0}' (expected one of: {expected})",
    expected = Plan::ALL.map(|plan| plan.as_str().to_lowercase()).join(", ")
)]
pub struct ParsePlanError(pub String);

impl FromStr for Plan {
    type Err = ParsePlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" | "gratuit" => Ok(Plan::Free),
            "plus" => Ok(Plan::Plus),
            "enterprise" | "entreprise" => Ok(Plan::Enterprise),
            _ => Err(ParsePlanError(s.to_string())),
        }
    }
}
