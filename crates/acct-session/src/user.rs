use crate::plan::Plan;

use serde::{Deserialize, Serialize};

/// The locally registered identity. Persisted as-is under the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub plan: Plan,
}

impl User {
    /// Fabricates a fresh user on the default plan. Nothing is validated.
    pub fn register(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: generate_user_id(),
            name: name.into(),
            email: email.into(),
            plan: Plan::default(),
        }
    }

    /// Copy of this user with only the plan replaced.
    pub fn with_plan(&self, plan: Plan) -> Self {
        Self {
            plan,
            ..self.clone()
        }
    }
}

/// Milliseconds since the Unix epoch, as a decimal string.
pub(crate) fn generate_user_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}
