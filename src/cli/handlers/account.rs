use crate::cli::output::UserJson;
use crate::io::DataDir;
use crate::model::user::User;

pub fn cmd_register(dir: &DataDir, user: &User, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    dir.user_store().register(user)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&UserJson {
                username: &user.username
            })?
        );
    } else {
        println!("registered {}", user.username);
    }
    Ok(())
}

/// Verify credentials and print the username as registered.
pub fn cmd_login(dir: &DataDir, user: &User, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stored = super::authenticate(dir, user)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&UserJson {
                username: &stored.username
            })?
        );
    } else {
        println!("logged in as {}", stored.username);
    }
    Ok(())
}
