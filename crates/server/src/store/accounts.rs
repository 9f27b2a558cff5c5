//! Account accessors over the store.

use mensa_core::{AccountId, Email};

use super::StoreInner;
use crate::models::Account;

impl StoreInner {
    /// Look up an account by ID.
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Look up an account by its unique email identity.
    pub fn account_by_email(&self, email: &Email) -> Option<&Account> {
        self.accounts.values().find(|account| &account.email == email)
    }

    /// Insert a new account.
    pub fn insert_account(&mut self, account: Account) {
        self.accounts.insert(account.id, account);
    }
}
