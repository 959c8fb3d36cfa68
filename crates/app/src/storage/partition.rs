//! Partition keys.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::auth::Identity;

/// What a partition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    Cart,
    Wishlist,
}

impl PartitionKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
        }
    }
}

/// Storage namespace for one kind of state owned by one identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey {
    kind: PartitionKind,
    identity: Identity,
}

impl PartitionKey {
    #[must_use]
    pub fn new(kind: PartitionKind, identity: Identity) -> Self {
        Self { kind, identity }
    }

    #[must_use]
    pub fn cart(identity: Identity) -> Self {
        Self::new(PartitionKind::Cart, identity)
    }

    #[must_use]
    pub fn wishlist(identity: Identity) -> Self {
        Self::new(PartitionKind::Wishlist, identity)
    }

    #[must_use]
    pub fn kind(&self) -> PartitionKind {
        self.kind
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl Display for PartitionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.identity {
            Identity::Guest => write!(f, "{}:guest", self.kind.as_str()),
            Identity::User(user) => write!(f, "{}:user:{user}", self.kind.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::UserId;

    use super::*;

    #[test]
    fn guest_and_users_get_separate_partitions() {
        let guest = PartitionKey::cart(Identity::Guest);
        let user = PartitionKey::cart(Identity::User(UserId::new("123")));

        assert_eq!(guest.to_string(), "cart:guest");
        assert_eq!(user.to_string(), "cart:user:123");
        assert_ne!(guest, user);
    }

    #[test]
    fn cart_and_wishlist_partitions_differ_for_the_same_user() {
        let identity = Identity::User(UserId::new("123"));

        assert_eq!(
            PartitionKey::wishlist(identity.clone()).to_string(),
            "wishlist:user:123"
        );
        assert_ne!(
            PartitionKey::wishlist(identity.clone()),
            PartitionKey::cart(identity)
        );
    }
}
