//! Session authentication.
//!
//! Login exchanges credentials for a bearer token; the token is stored
//! in the `sessions` collection and resolved back to an account on every
//! request. The account is re-read each time, so a role change applies
//! to the very next request, not the next login.

use crate::directory::UserDirectory;
use crate::error::{Error, Result};
use crate::models::{Role, UserAccount};
use crate::storage::Storage;
use axum::http::{header, HeaderMap};
use rand::RngCore;
use std::sync::Arc;

/// Sessions collection name.
const SESSIONS: &str = "sessions";

/// An authenticated caller.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Account id of the caller
    pub uid: String,
    /// Role at the time of this request
    pub role: Role,
}

/// Issues and resolves session tokens.
pub struct Authenticator {
    storage: Arc<Storage>,
    directory: Arc<UserDirectory>,
}

impl Authenticator {
    /// Create an authenticator over the shared storage and directory.
    pub fn new(storage: Arc<Storage>, directory: Arc<UserDirectory>) -> Self {
        Self { storage, directory }
    }

    /// Verify credentials and open a session.
    ///
    /// Returns the bearer token plus the account it belongs to. Unknown
    /// email and wrong password fail identically so the response does
    /// not reveal which emails have accounts.
    pub fn login(&self, email: &str, password: &str) -> Result<(String, UserAccount)> {
        let account = self
            .directory
            .find_by_email(email)?
            .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;

        let digest = digest_password(&account.password_salt, password);
        if digest != account.password_digest {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        }

        let token = generate_token();
        let session = serde_json::json!({ "token": token, "uid": account.uid });
        self.storage.set_document(SESSIONS, &token, &session, false)?;

        tracing::info!("Session opened for account {}", account.uid);
        Ok((token, account))
    }

    /// Revoke the session named by the request headers, if any.
    pub fn logout(&self, headers: &HeaderMap) -> Result<()> {
        if let Some(token) = bearer_token(headers) {
            self.storage.delete_document(SESSIONS, token)?;
            tracing::info!("Session closed");
        }
        Ok(())
    }

    /// Resolve the bearer token in the request headers to an identity.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Identity> {
        let token = bearer_token(headers)
            .ok_or_else(|| Error::Unauthorized("Missing authorization token".to_string()))?;

        let session = self
            .storage
            .get_document(SESSIONS, token)?
            .ok_or_else(|| Error::Unauthorized("Invalid or expired session".to_string()))?;

        let uid = session
            .get("uid")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Unauthorized("Invalid or expired session".to_string()))?;

        // Fresh read: the stored role governs, not the role at login.
        let account = self
            .directory
            .get_account(uid)?
            .ok_or_else(|| Error::Unauthorized("Invalid or expired session".to_string()))?;

        Ok(Identity {
            uid: account.uid,
            role: account.role,
        })
    }
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Generate a fresh session token, 32 random bytes hex encoded.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generate a fresh password salt, hex encoded.
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Digest a password with the given salt.
pub fn digest_password(salt: &str, password: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use tempfile::tempdir;

    fn open_auth(dir: &tempfile::TempDir) -> (Authenticator, Arc<UserDirectory>) {
        let storage = Arc::new(Storage::open(dir.path()).unwrap());
        let directory = Arc::new(UserDirectory::new(Arc::clone(&storage)));
        (Authenticator::new(storage, Arc::clone(&directory)), directory)
    }

    fn bearer_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn digest_is_deterministic_and_salted() {
        assert_eq!(digest_password("s1", "pw"), digest_password("s1", "pw"));
        assert_ne!(digest_password("s1", "pw"), digest_password("s2", "pw"));
        assert_ne!(digest_password("s1", "pw"), digest_password("s1", "other"));
    }

    #[test]
    fn login_and_authenticate() {
        let dir = tempdir().unwrap();
        let (auth, directory) = open_auth(&dir);
        directory
            .create_account("ana@example.com", "Ana", Role::Student, "secret")
            .unwrap();

        let (token, account) = auth.login("ana@example.com", "secret").unwrap();
        assert_eq!(token.len(), 64);

        let identity = auth.authenticate(&bearer_headers(&token)).unwrap();
        assert_eq!(identity.uid, account.uid);
        assert_eq!(identity.role, Role::Student);
    }

    #[test]
    fn wrong_password_and_unknown_email_fail_alike() {
        let dir = tempdir().unwrap();
        let (auth, directory) = open_auth(&dir);
        directory
            .create_account("ana@example.com", "Ana", Role::Student, "secret")
            .unwrap();

        let wrong = auth.login("ana@example.com", "nope").unwrap_err();
        let unknown = auth.login("ghost@example.com", "secret").unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[test]
    fn unprovisioned_account_cannot_log_in() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(Storage::open(dir.path()).unwrap());
        let directory = Arc::new(UserDirectory::new(Arc::clone(&storage)));
        let auth = Authenticator::new(Arc::clone(&storage), directory);

        // A users document written by the profile mirror alone: no salt,
        // no digest.
        let doc = serde_json::json!({"uid": "m1", "email": "mirror@example.com", "name": "M"});
        storage
            .set_document(UserAccount::COLLECTION, "m1", &doc, true)
            .unwrap();

        assert!(auth.login("mirror@example.com", "").is_err());
    }

    #[test]
    fn logout_revokes_session() {
        let dir = tempdir().unwrap();
        let (auth, directory) = open_auth(&dir);
        directory
            .create_account("ana@example.com", "Ana", Role::Student, "secret")
            .unwrap();

        let (token, _) = auth.login("ana@example.com", "secret").unwrap();
        let headers = bearer_headers(&token);

        auth.logout(&headers).unwrap();
        assert!(auth.authenticate(&headers).is_err());
    }

    #[test]
    fn missing_and_malformed_tokens_are_rejected() {
        let dir = tempdir().unwrap();
        let (auth, _) = open_auth(&dir);

        assert!(auth.authenticate(&HeaderMap::new()).is_err());
        assert!(auth.authenticate(&bearer_headers("bogus")).is_err());
    }

    #[test]
    fn role_change_applies_to_next_request() {
        let dir = tempdir().unwrap();
        let (auth, directory) = open_auth(&dir);
        let account = directory
            .create_account("ana@example.com", "Ana", Role::Student, "secret")
            .unwrap();

        let (token, _) = auth.login("ana@example.com", "secret").unwrap();
        directory.set_role(&account.uid, Role::Teacher).unwrap();

        let identity = auth.authenticate(&bearer_headers(&token)).unwrap();
        assert_eq!(identity.role, Role::Teacher);
    }
}
