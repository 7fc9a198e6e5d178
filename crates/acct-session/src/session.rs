use crate::user::User;

use serde::Serialize;

/// Whether a user is currently held. There is no token or expiry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Absent,
    Present(User),
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Absent => None,
            Session::Present(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Present(_))
    }
}

impl From<Option<User>> for Session {
    fn from(user: Option<User>) -> Self {
        user.map_or(Session::Absent, Session::Present)
    }
}

/// Read-only view handed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user().cloned(),
            is_authenticated: session.is_authenticated(),
        }
    }
}
