use serde::{Deserialize, Serialize};

/// Login credentials as stored in `users.txt`.
///
/// The password is kept in plain text, matching the existing file format.
/// Anything beyond a single trusted machine should hash it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        User {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Usernames compare case-insensitively everywhere: registration, login,
/// and audit-log lookups.
pub fn usernames_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
