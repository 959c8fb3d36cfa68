//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::auth::{Identity, UserId};

/// Bearer token of the current request, kept so the session can be ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BearerToken(pub(crate) String);

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_identity(&mut self, identity: Identity, token: Option<BearerToken>);

    /// The identity resolved by the auth middleware.
    fn identity_or_500(&self) -> Result<Identity, StatusError>;

    fn user_id_or_401(&self) -> Result<UserId, StatusError>;

    fn bearer_token_or_401(&self) -> Result<&BearerToken, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity, token: Option<BearerToken>) {
        self.inject(identity);

        if let Some(token) = token {
            self.inject(token);
        }
    }

    fn identity_or_500(&self) -> Result<Identity, StatusError> {
        self.obtain_or_500::<Identity>().cloned()
    }

    fn user_id_or_401(&self) -> Result<UserId, StatusError> {
        self.identity_or_500()?
            .user_id()
            .cloned()
            .ok_or_else(|| StatusError::unauthorized().brief("Login required"))
    }

    fn bearer_token_or_401(&self) -> Result<&BearerToken, StatusError> {
        self.obtain::<BearerToken>()
            .map_err(|_ignored| StatusError::unauthorized().brief("Missing session token"))
    }
}
