//! The user session store.

use crate::{
    error::{Result as SessionResult, SessionError},
    load_report::LoadReport,
    plan::Plan,
    session::{Session, SessionSnapshot},
    storage::{FileStorage, KeyValueStorage},
    user::User,
};

use std::sync::{Mutex, MutexGuard, PoisonError};

use acct_config::{Config, CorruptionPolicy, DEFAULT_STORAGE_KEY};
use log::{debug, info, warn};
use tokio::sync::watch;

/// Owns the current user and its durable mirror.
///
/// Every mutation writes storage first and publishes the new value only once
/// the write succeeded, so memory and storage agree after each call returns.
/// Separate processes sharing one storage are not coordinated.
pub struct SessionStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    state_tx: watch::Sender<Session>,
    write_lock: Mutex<()>,
    load_report: LoadReport,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Opens the store under the default key, discarding corrupt data.
    pub fn open(storage: S) -> SessionResult<Self> {
        Self::open_with(storage, DEFAULT_STORAGE_KEY, CorruptionPolicy::default())
    }

    /// Opens the store and rehydrates it from `storage` exactly once.
    pub fn open_with(
        storage: S,
        key: impl Into<String>,
        policy: CorruptionPolicy,
    ) -> SessionResult<Self> {
        let key = key.into();
        let (session, load_report) = Self::rehydrate(&storage, &key, policy)?;
        let (state_tx, _) = watch::channel(session);

        Ok(Self {
            storage,
            key,
            state_tx,
            write_lock: Mutex::new(()),
            load_report,
        })
    }

    fn rehydrate(
        storage: &S,
        key: &str,
        policy: CorruptionPolicy,
    ) -> SessionResult<(Session, LoadReport)> {
        let Some(raw) = storage.get_item(key)? else {
            info!("No persisted session under '{key}' (first start)");
            return Ok((Session::Absent, LoadReport::FirstStart));
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                info!("Rehydrated session for user {} ({})", user.id, user.plan);
                Ok((Session::Present(user), LoadReport::Loaded))
            }
            Err(e) => match policy {
                CorruptionPolicy::Fail => Err(SessionError::corrupted(key, e.to_string())),
                CorruptionPolicy::Discard => {
                    warn!("Persisted session under '{key}' is corrupted: {e}");
                    let backup = storage.quarantine(key)?;
                    Ok((
                        Session::Absent,
                        LoadReport::Discarded {
                            message: e.to_string(),
                            backup,
                        },
                    ))
                }
            },
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn session(&self) -> Session {
        self.state_tx.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state_tx.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state_tx.borrow().is_authenticated()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(&*self.state_tx.borrow())
    }

    /// Receiver that sees every change, after it has been persisted.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state_tx.subscribe()
    }

    /// Creates a new user on the default plan, replacing any current one.
    ///
    /// The password is accepted for API compatibility and dropped.
    pub fn register(&self, name: &str, email: &str, _password: &str) -> SessionResult<User> {
        let _guard = self.lock();

        let user = User::register(name, email);
        self.persist(&user)?;
        self.publish(Session::Present(user.clone()));

        info!("Registered user {} on plan {}", user.id, user.plan);
        Ok(user)
    }

    /// Clears the current user and its persisted entry. Succeeds when no
    /// user is present.
    pub fn logout(&self) -> SessionResult<()> {
        let _guard = self.lock();

        self.storage.remove_item(&self.key)?;
        if self.publish(Session::Absent) {
            info!("Logged out");
        }
        Ok(())
    }

    /// Switches the current user's plan.
    ///
    /// Returns `None` without touching anything when no user is present.
    pub fn update_plan(&self, plan: Plan) -> SessionResult<Option<User>> {
        let _guard = self.lock();

        let Some(current) = self.user() else {
            debug!("Plan change to {plan} ignored: no user");
            return Ok(None);
        };

        let updated = current.with_plan(plan);
        self.persist(&updated)?;
        self.publish(Session::Present(updated.clone()));

        info!(
            "Plan for user {} changed {} -> {}",
            updated.id, current.plan, updated.plan
        );
        Ok(Some(updated))
    }

    fn persist(&self, user: &User) -> SessionResult<()> {
        let json = serde_json::to_string_pretty(user)?;
        self.storage.set_item(&self.key, &json)?;
        Ok(())
    }

    /// Returns whether subscribers were notified.
    fn publish(&self, next: Session) -> bool {
        self.state_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore<FileStorage> {
    /// Opens a file-backed store as described by `config`.
    pub fn open_from_config(config: &Config) -> SessionResult<Self> {
        let storage = FileStorage::new(config.storage_path());
        Self::open_with(storage, config.storage.key.clone(), config.storage.on_corrupt)
    }
}
