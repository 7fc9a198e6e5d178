use serde::Serialize;

/// Outcome of rehydrating the store from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadReport {
    /// Nothing was persisted under the key.
    FirstStart,
    /// The persisted user was restored.
    Loaded,
    /// The persisted entry did not parse and was moved aside.
    Discarded {
        message: String,
        backup: Option<String>,
    },
}
