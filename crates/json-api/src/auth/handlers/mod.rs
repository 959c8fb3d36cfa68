//! Auth Handlers

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod signup;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::auth::{Session, User};

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The user id, used as the storage partition of the user's cart and wishlist
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_string(),
            name: user.name,
            email: user.email,
        }
    }
}

/// Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token for subsequent requests
    pub token: String,

    /// The signed-in user
    pub user: UserResponse,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user: session.user.into(),
        }
    }
}
