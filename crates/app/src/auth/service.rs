//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::auth::{AuthServiceError, CredentialTable, NewAccount, Session, User};

/// Identity provider backed by a [`CredentialTable`] and an in-process
/// session map. Both are owned by the service instance built at startup.
#[derive(Debug)]
pub struct InMemoryAuthService {
    credentials: CredentialTable,
    sessions: RwLock<FxHashMap<String, User>>,
}

impl InMemoryAuthService {
    #[must_use]
    pub fn new(credentials: CredentialTable) -> Self {
        Self {
            credentials,
            sessions: RwLock::new(FxHashMap::default()),
        }
    }

    async fn open_session(&self, user: User) -> Session {
        let token = generate_session_token();

        self.sessions
            .write()
            .await
            .insert(token.clone(), user.clone());

        Session { token, user }
    }
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError> {
        let user = self
            .credentials
            .verify(email, password)
            .await
            .ok_or(AuthServiceError::InvalidCredentials)?;

        info!(user_id = %user.id, "user signed in");

        Ok(self.open_session(user).await)
    }

    async fn signup(&self, account: NewAccount) -> Result<Session, AuthServiceError> {
        let user = self.credentials.register(account).await?;

        info!(user_id = %user.id, "account created");

        Ok(self.open_session(user).await)
    }

    async fn logout(&self, token: &str) -> Result<(), AuthServiceError> {
        self.sessions
            .write()
            .await
            .remove(token)
            .map(|user| info!(user_id = %user.id, "user signed out"))
            .ok_or(AuthServiceError::NotFound)
    }

    async fn authenticate_bearer(&self, token: &str) -> Result<User, AuthServiceError> {
        self.sessions
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError>;

    /// Create an account and sign it in.
    async fn signup(&self, account: NewAccount) -> Result<Session, AuthServiceError>;

    /// End the session identified by `token`.
    async fn logout(&self, token: &str) -> Result<(), AuthServiceError>;

    /// Resolve a bearer token to its user.
    async fn authenticate_bearer(&self, token: &str) -> Result<User, AuthServiceError>;
}

fn generate_session_token() -> String {
    format!("st_{}{}", Uuid::now_v7().simple(), Uuid::now_v7().simple())
}
