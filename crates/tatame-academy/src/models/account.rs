//! User account model.

use serde::{Deserialize, Serialize};

/// Access role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access: manage students, record attendance
    Teacher,
    /// Read access to the student's own record
    Student,
}

impl Default for Role {
    fn default() -> Self {
        Role::Student
    }
}

impl Role {
    /// Lowercase label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

/// A login account in the `users` collection, keyed by `uid`.
///
/// Profile saves mirror student fields into this document with merge
/// semantics, so the credential fields written at provisioning time
/// survive later profile updates. Credential fields default to empty for
/// documents that were mirrored before the account was provisioned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    /// Account id, also the document id
    #[serde(default)]
    pub uid: String,

    /// Login identifier
    #[serde(default)]
    pub email: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Access role; governs every API call
    #[serde(default)]
    pub role: Role,

    /// Hex salt fed into the password digest
    #[serde(default)]
    pub password_salt: String,

    /// Hex blake3 digest of salt + password
    #[serde(default)]
    pub password_digest: String,
}

impl UserAccount {
    /// Collection name in the document store.
    pub const COLLECTION: &'static str = "users";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
    }

    #[test]
    fn role_round_trip() {
        let role: Role = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(role, Role::Teacher);
        assert_eq!(role.as_str(), "teacher");
    }

    #[test]
    fn partial_account_defaults_to_student_role() {
        // A users document written only by the profile mirror has no
        // role or credential fields yet.
        let account: UserAccount =
            serde_json::from_str(r#"{"uid": "x1", "email": "x@example.com"}"#).unwrap();
        assert_eq!(account.role, Role::Student);
        assert_eq!(account.password_digest, "");
    }

    #[test]
    fn account_ignores_mirrored_profile_fields() {
        let doc = r#"{
            "uid": "x1",
            "email": "x@example.com",
            "name": "X",
            "role": "student",
            "belt": "blue",
            "age": 20,
            "degrees": 1
        }"#;
        let account: UserAccount = serde_json::from_str(doc).unwrap();
        assert_eq!(account.uid, "x1");
        assert_eq!(account.role, Role::Student);
    }
}
