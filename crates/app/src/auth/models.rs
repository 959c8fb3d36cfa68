//! Auth data models.

use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// User ID
pub type UserId = TypedId<User>;

/// An authenticated storefront customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// The identity a request acts as. Guests share a single storage partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Identity {
    #[default]
    Guest,
    User(UserId),
}

impl Identity {
    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Guest => None,
            Self::User(id) => Some(id),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::User(user.id.clone())
    }
}

/// Sign-up payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// An issued session: the bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}
