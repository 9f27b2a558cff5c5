//! Customer reference: durable account or free-text guest name.

use serde::{Deserialize, Serialize};

use crate::id::AccountId;

/// Who an order belongs to.
///
/// Orders placed anonymously are attributed to a free-text guest name;
/// orders placed by (or migrated to) a registered account carry the
/// account ID. The wire format is untagged: a JSON number is an account
/// ID, a JSON string is a guest name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerRef {
    /// A durable, credentialed account.
    Account(AccountId),
    /// An anonymous customer, identified only by display name.
    Guest(String),
}

impl CustomerRef {
    /// The account ID, if this reference is a durable account.
    #[must_use]
    pub const fn account_id(&self) -> Option<AccountId> {
        match self {
            Self::Account(id) => Some(*id),
            Self::Guest(_) => None,
        }
    }

    /// The guest display name, if this reference is anonymous.
    #[must_use]
    pub fn guest_name(&self) -> Option<&str> {
        match self {
            Self::Account(_) => None,
            Self::Guest(name) => Some(name.as_str()),
        }
    }
}

impl From<AccountId> for CustomerRef {
    fn from(id: AccountId) -> Self {
        Self::Account(id)
    }
}

impl std::fmt::Display for CustomerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Account(id) => write!(f, "account:{id}"),
            Self::Guest(name) => write!(f, "guest:{name}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_wire_format() {
        let account = CustomerRef::Account(AccountId::new(3));
        assert_eq!(serde_json::to_string(&account).unwrap(), "3");

        let guest = CustomerRef::Guest("Sam".to_owned());
        assert_eq!(serde_json::to_string(&guest).unwrap(), "\"Sam\"");

        let parsed: CustomerRef = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, account);
        let parsed: CustomerRef = serde_json::from_str("\"Sam\"").unwrap();
        assert_eq!(parsed, guest);
    }

    #[test]
    fn test_accessors() {
        let account = CustomerRef::Account(AccountId::new(9));
        assert_eq!(account.account_id(), Some(AccountId::new(9)));
        assert_eq!(account.guest_name(), None);

        let guest = CustomerRef::Guest("Alex".to_owned());
        assert_eq!(guest.account_id(), None);
        assert_eq!(guest.guest_name(), Some("Alex"));
    }
}
