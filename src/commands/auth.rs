//! Login, logout, and session inspection

use std::env;

use owo_colors::OwoColorize;

use crate::api::types::AuthRequest;
use crate::api::{CrmApi, HttpApi};
use crate::config::Config;
use crate::error::{Result, RolodexError};
use crate::session::{Role, Session};

use super::prompt;

/// Authenticate against the backend and persist the session
pub async fn cmd_login(
    username: Option<String>,
    password: Option<String>,
    role: Role,
) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt("Username")?,
    };
    let password = match password {
        Some(p) => p,
        None => match env::var("ROLODEX_PASSWORD") {
            Ok(p) if !p.is_empty() => p,
            _ => prompt("Password")?,
        },
    };

    if username.is_empty() || password.is_empty() {
        return Err(RolodexError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let config = Config::load()?;
    let api = HttpApi::new(&config, None)?;
    let response = api
        .login(&AuthRequest {
            username: username.clone(),
            password,
        })
        .await?;

    // The backend echoes the role for some deployments; fall back to the
    // one requested on the command line.
    let role = response
        .role
        .as_deref()
        .and_then(|r| r.parse::<Role>().ok())
        .unwrap_or(role);

    let session = Session::new(response.token, role, response.user_id, username);
    session.save()?;

    println!(
        "Logged in as {} ({})",
        session.username.bold(),
        session.role
    );
    Ok(())
}

/// Clear the persisted session
pub fn cmd_logout() -> Result<()> {
    Session::clear()?;
    println!("Logged out.");
    Ok(())
}

/// Show the current session
pub fn cmd_whoami() -> Result<()> {
    match Session::load()? {
        Some(session) => {
            println!(
                "{} ({}), user id {}",
                session.username.bold(),
                session.role,
                session.user_id
            );
        }
        None => println!("Not logged in."),
    }
    Ok(())
}
