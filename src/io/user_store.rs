use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::audit_log::SYSTEM_USER;
use super::data_dir::sanitize_username;
use super::{StoreError, read_record_lines};
use crate::model::user::{User, usernames_match};
use crate::parse::{breaks_record, decode_user, encode_user};

/// The shared credentials file. Append-only: records are never rewritten.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: PathBuf) -> Self {
        UserStore { path }
    }

    /// Register a new user. Usernames are unique case-insensitively, and so
    /// are the task-file names they map to. The audit log's own user name
    /// is reserved.
    pub fn register(&self, user: &User) -> Result<(), StoreError> {
        if user.username.trim().is_empty() || user.password.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "username and password are required".into(),
            ));
        }
        if breaks_record(&user.username) || breaks_record(&user.password) {
            return Err(StoreError::InvalidInput(
                "username and password may not contain '|' or line breaks".into(),
            ));
        }
        if usernames_match(&user.username, SYSTEM_USER) {
            return Err(StoreError::InvalidInput(format!(
                "the username '{}' is reserved",
                user.username
            )));
        }

        let existing = self.load_all()?;
        if existing
            .iter()
            .any(|u| usernames_match(&u.username, &user.username))
        {
            return Err(StoreError::AlreadyExists(user.username.clone()));
        }
        let stem = sanitize_username(&user.username);
        if let Some(other) = existing
            .iter()
            .find(|u| usernames_match(&sanitize_username(&u.username), &stem))
        {
            return Err(StoreError::InvalidInput(format!(
                "'{}' would share a task file with existing user '{}'",
                user.username, other.username
            )));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        writeln!(file, "{}", encode_user(user)).map_err(|e| StoreError::io(&self.path, e))?;
        debug!(username = %user.username, "registered user");
        Ok(())
    }

    /// True iff a stored user has this username (any casing) and exactly
    /// this password.
    pub fn validate(&self, user: &User) -> Result<bool, StoreError> {
        Ok(self.authenticate(user)?.is_some())
    }

    /// Like [`validate`](Self::validate), but returns the stored record so
    /// callers can continue with the username's registered casing.
    pub fn authenticate(&self, user: &User) -> Result<Option<User>, StoreError> {
        let found = self.load_all()?.into_iter().find(|stored| {
            usernames_match(&stored.username, &user.username) && stored.password == user.password
        });
        Ok(found)
    }

    /// Every decodable user record. Blank, malformed and non-UTF-8 lines
    /// are skipped.
    pub fn load_all(&self) -> Result<Vec<User>, StoreError> {
        let mut users = Vec::new();
        for (line_no, line) in read_record_lines(&self.path)? {
            match decode_user(&line) {
                Ok(user) => users.push(user),
                Err(e) => warn!(line = line_no, "skipping credentials record: {}", e),
            }
        }
        Ok(users)
    }
}
