//! In-memory credential table.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{AuthServiceError, NewAccount, User, UserId};

pub const DEMO_ACCOUNT_EMAIL: &str = "user@example.com";
pub const DEMO_ACCOUNT_PASSWORD: &str = "password";
pub const DEMO_ACCOUNT_UID: &str = "123";
pub const DEMO_ACCOUNT_NAME: &str = "Test User";

struct Account {
    user: User,
    password: String,
}

impl Debug for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Account")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Email-keyed accounts. Passwords are compared verbatim; this table is a
/// stand-in identity provider, not a credential store.
#[derive(Debug, Default)]
pub struct CredentialTable {
    accounts: RwLock<FxHashMap<String, Account>>,
}

impl CredentialTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding only the demo account.
    #[must_use]
    pub fn with_demo_account() -> Self {
        let mut accounts = FxHashMap::default();

        accounts.insert(
            DEMO_ACCOUNT_EMAIL.to_string(),
            Account {
                user: User {
                    id: UserId::new(DEMO_ACCOUNT_UID),
                    name: DEMO_ACCOUNT_NAME.to_string(),
                    email: DEMO_ACCOUNT_EMAIL.to_string(),
                },
                password: DEMO_ACCOUNT_PASSWORD.to_string(),
            },
        );

        Self {
            accounts: RwLock::new(accounts),
        }
    }

    /// Look up the user owning `email` if `password` matches.
    pub async fn verify(&self, email: &str, password: &str) -> Option<User> {
        let accounts = self.accounts.read().await;

        accounts
            .get(&normalize_email(email))
            .filter(|account| account.password == password)
            .map(|account| account.user.clone())
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::AlreadyExists`] when the email is taken and
    /// [`AuthServiceError::MissingRequiredData`] for blank fields.
    pub async fn register(&self, account: NewAccount) -> Result<User, AuthServiceError> {
        let email = normalize_email(&account.email);

        if email.is_empty() || account.name.trim().is_empty() || account.password.is_empty() {
            return Err(AuthServiceError::MissingRequiredData);
        }

        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&email) {
            return Err(AuthServiceError::AlreadyExists);
        }

        let user = User {
            id: UserId::new(format!("user_{}", Uuid::now_v7().simple())),
            name: account.name.trim().to_string(),
            email: email.clone(),
        };

        accounts.insert(
            email,
            Account {
                user: user.clone(),
                password: account.password,
            },
        );

        Ok(user)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_account_verifies_with_its_password() {
        let table = CredentialTable::with_demo_account();

        let user = table.verify("User@Example.com ", DEMO_ACCOUNT_PASSWORD).await;

        assert_eq!(user.map(|u| u.id), Some(UserId::new(DEMO_ACCOUNT_UID)));
        assert!(table.verify(DEMO_ACCOUNT_EMAIL, "wrong").await.is_none());
    }

    #[tokio::test]
    async fn registering_a_taken_email_is_rejected() {
        let table = CredentialTable::with_demo_account();

        let result = table
            .register(NewAccount {
                name: "Someone".to_string(),
                email: DEMO_ACCOUNT_EMAIL.to_string(),
                password: "secret".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );
    }

    #[tokio::test]
    async fn registered_accounts_can_sign_in() -> Result<(), AuthServiceError> {
        let table = CredentialTable::new();

        let user = table
            .register(NewAccount {
                name: "Rahim".to_string(),
                email: "rahim@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await?;

        assert!(user.id.as_str().starts_with("user_"));
        assert_eq!(
            table.verify("rahim@example.com", "secret").await,
            Some(user)
        );

        Ok(())
    }
}
