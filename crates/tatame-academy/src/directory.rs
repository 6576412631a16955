//! User directory - account provisioning and lookup.
//!
//! Accounts live in the `users` collection. Provisioning generates the
//! uid, salts and digests the password, and writes the account document;
//! the student record in `students` is keyed by the same uid.

use crate::auth;
use crate::error::{Error, Result};
use crate::models::{Role, UserAccount};
use crate::storage::Storage;
use std::sync::Arc;

/// Directory of login accounts.
pub struct UserDirectory {
    storage: Arc<Storage>,
}

impl UserDirectory {
    /// Create a directory over the shared storage.
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Provision a new account.
    ///
    /// Fails with [`Error::EmailTaken`] when an account with the same
    /// email already exists; the email is the login identifier and must
    /// stay unique.
    pub fn create_account(
        &self,
        email: &str,
        name: &str,
        role: Role,
        password: &str,
    ) -> Result<UserAccount> {
        if self.find_by_email(email)?.is_some() {
            return Err(Error::EmailTaken);
        }

        let salt = auth::generate_salt();
        let account = UserAccount {
            uid: generate_uid(email),
            email: email.to_string(),
            name: name.to_string(),
            role,
            password_digest: auth::digest_password(&salt, password),
            password_salt: salt,
        };

        let doc = serde_json::to_value(&account)?;
        self.storage
            .set_document(UserAccount::COLLECTION, &account.uid, &doc, true)?;

        tracing::info!("Provisioned {} account {} for {}", role.as_str(), account.uid, email);
        Ok(account)
    }

    /// Get an account by uid.
    pub fn get_account(&self, uid: &str) -> Result<Option<UserAccount>> {
        match self.storage.get_document(UserAccount::COLLECTION, uid)? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    /// Look up an account by email (login identifier).
    pub fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        for doc in self.storage.list_documents(UserAccount::COLLECTION)? {
            let account: UserAccount = serde_json::from_value(doc)?;
            if account.email == email {
                return Ok(Some(account));
            }
        }
        Ok(None)
    }

    /// Change an account's role. Takes effect on the account's very next
    /// authenticated request.
    pub fn set_role(&self, uid: &str, role: Role) -> Result<()> {
        if self.get_account(uid)?.is_none() {
            return Err(Error::NotFound("Account".to_string()));
        }

        let patch = serde_json::json!({ "role": role });
        self.storage.set_document(UserAccount::COLLECTION, uid, &patch, true)?;

        tracing::info!("Set role {} on account {}", role.as_str(), uid);
        Ok(())
    }

    /// List every account.
    pub fn list_accounts(&self) -> Result<Vec<UserAccount>> {
        let mut accounts = Vec::new();
        for doc in self.storage.list_documents(UserAccount::COLLECTION)? {
            accounts.push(serde_json::from_value(doc)?);
        }
        Ok(accounts)
    }
}

/// Generate an account id from the email and the current time.
fn generate_uid(email: &str) -> String {
    let content = format!(
        "{}:{}",
        email,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
    );
    let hash = blake3::hash(content.as_bytes());
    hex::encode(hash.as_bytes())
}
