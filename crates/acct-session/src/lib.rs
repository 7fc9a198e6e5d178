//! Local account session store.
//!
//! Holds the current user in memory, mirrors it to a key-value storage so it
//! survives a restart, and hands it to the rest of an application either as
//! an injected [`SessionHandle`] or through a scoped [`SessionProvider`].

pub mod context;
pub mod error;
pub mod load_report;
pub mod plan;
pub mod session;
pub mod storage;
pub mod store;
pub mod user;

#[cfg(test)]
mod tests;

pub use context::{SessionApi, SessionHandle, SessionProvider, try_use_session, use_session};
pub use error::{Result as SessionResult, SessionError};
pub use load_report::LoadReport;
pub use plan::{ParsePlanError, Plan};
pub use session::{Session, SessionSnapshot};
pub use storage::{
    FileStorage, KeyValueStorage, MemoryStorage, StorageError, StorageResult,
};
pub use store::SessionStore;
pub use user::User;
