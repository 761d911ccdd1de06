//! Account directory.
//!
//! Handlers talk to an [`AccountStore`] trait object held in
//! [`crate::state::AppState`]. The bundled [`InMemoryAccountStore`] keeps
//! accounts for the lifetime of the process.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use anyhow::anyhow;
use chrono::Utc;
use servicehub_core::AppError;
use uuid::Uuid;

use super::model::{Account, NewAccount};

pub trait AccountStore: Send + Sync + fmt::Debug {
    /// Inserts a new account. Fails with 409 if the email is already registered.
    fn insert(&self, account: NewAccount) -> Result<Account, AppError>;

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError>;
}

/// Emails are unique case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AccountStore for InMemoryAccountStore {
    fn insert(&self, account: NewAccount) -> Result<Account, AppError> {
        let email = normalize_email(&account.email);
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if accounts.values().any(|existing| existing.email == email) {
            return Err(AppError::conflict(anyhow!(
                "User already exists with this email."
            )));
        }

        let account = Account {
            id: Uuid::new_v4(),
            name: account.name.trim().to_string(),
            email,
            password_hash: account.password_hash,
            role: account.role,
            phone: account.phone,
            location: account.location,
            created_at: Utc::now(),
        };
        accounts.insert(account.id, account.clone());

        Ok(account)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let email = normalize_email(email);
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        Ok(accounts.get(&id).cloned())
    }
}
