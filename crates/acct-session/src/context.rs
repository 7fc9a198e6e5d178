//! Handing the session to consumers.
//!
//! Prefer passing a [`SessionHandle`] explicitly. Code that cannot thread it
//! through can run inside [`SessionProvider::scope`] and call
//! [`use_session`].

use crate::{
    error::{Result as SessionResult, SessionError},
    plan::Plan,
    session::{Session, SessionSnapshot},
    storage::KeyValueStorage,
    store::SessionStore,
    user::User,
};

use std::cell::RefCell;
use std::sync::Arc;

use tokio::sync::watch;

/// Everything a consumer may do with the session.
pub trait SessionApi: Send + Sync {
    fn user(&self) -> Option<User>;

    fn is_authenticated(&self) -> bool;

    fn snapshot(&self) -> SessionSnapshot;

    fn register(&self, name: &str, email: &str, password: &str) -> SessionResult<User>;

    fn logout(&self) -> SessionResult<()>;

    fn update_plan(&self, plan: Plan) -> SessionResult<Option<User>>;

    fn subscribe(&self) -> watch::Receiver<Session>;
}

pub type SessionHandle = Arc<dyn SessionApi>;

impl<S: KeyValueStorage> SessionApi for SessionStore<S> {
    fn user(&self) -> Option<User> {
        SessionStore::user(self)
    }

    fn is_authenticated(&self) -> bool {
        SessionStore::is_authenticated(self)
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionStore::snapshot(self)
    }

    fn register(&self, name: &str, email: &str, password: &str) -> SessionResult<User> {
        SessionStore::register(self, name, email, password)
    }

    fn logout(&self) -> SessionResult<()> {
        SessionStore::logout(self)
    }

    fn update_plan(&self, plan: Plan) -> SessionResult<Option<User>> {
        SessionStore::update_plan(self, plan)
    }

    fn subscribe(&self) -> watch::Receiver<Session> {
        SessionStore::subscribe(self)
    }
}

thread_local! {
    static PROVIDERS: RefCell<Vec<SessionHandle>> = const { RefCell::new(Vec::new()) };
}

/// Makes a handle available to [`use_session`] on the current thread.
#[derive(Clone)]
pub struct SessionProvider {
    handle: SessionHandle,
}

impl SessionProvider {
    pub fn new(handle: SessionHandle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Runs `f` with this provider innermost. The previous provider is
    /// restored when `f` returns or unwinds.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        PROVIDERS.with(|providers| providers.borrow_mut().push(self.handle.clone()));
        let _guard = ScopeGuard;
        f()
    }
}

struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let _ = PROVIDERS.try_with(|providers| providers.borrow_mut().pop());
    }
}

/// The innermost provided handle.
///
/// # Panics
///
/// When called outside of any [`SessionProvider::scope`]. That is a wiring
/// bug, not a runtime condition.
#[track_caller]
pub fn use_session() -> SessionHandle {
    match current_handle() {
        Some(handle) => handle,
        None => panic!("use_session must be called within a SessionProvider"),
    }
}

/// Like [`use_session`] but returns [`SessionError::NoProvider`] instead of
/// panicking.
#[track_caller]
pub fn try_use_session() -> SessionResult<SessionHandle> {
    match current_handle() {
        Some(handle) => Ok(handle),
        None => Err(SessionError::no_provider()),
    }
}

fn current_handle() -> Option<SessionHandle> {
    PROVIDERS.with(|providers| providers.borrow().last().cloned())
}
