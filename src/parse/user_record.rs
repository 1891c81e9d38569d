use crate::model::user::User;

use super::{DELIMITER, RecordError, RecordKind};

/// `username|password`
pub fn encode_user(user: &User) -> String {
    format!("{}{}{}", user.username, DELIMITER, user.password)
}

/// Decode a credentials line. Extra trailing fields are ignored.
pub fn decode_user(line: &str) -> Result<User, RecordError> {
    let parts: Vec<&str> = line.split(DELIMITER).collect();
    if parts.len() < 2 {
        return Err(RecordError::malformed(
            RecordKind::User,
            format!("expected 2 fields, found {}", parts.len()),
        ));
    }
    if parts[0].trim().is_empty() {
        return Err(RecordError::malformed(RecordKind::User, "empty username"));
    }
    Ok(User::new(parts[0], parts[1]))
}
