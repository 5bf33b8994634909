//! The logged-in customer's own profile

use owo_colors::OwoColorize;

use crate::api::types::CustomerUpdate;
use crate::api::CrmApi;
use crate::error::{Result, RolodexError};
use crate::formatting::{date_cell, text_cell};

use super::client;

/// Show the profile of the logged-in user
pub async fn cmd_profile_show(json: bool) -> Result<()> {
    let (api, session, _config) = client()?;
    let customer = api.get_customer(session.user_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&customer)?);
        return Ok(());
    }

    println!("{:<10} {}", "Username:", customer.username.bold());
    println!("{:<10} {}", "Email:", customer.email);
    println!("{:<10} {}", "Phone:", text_cell(customer.phone.as_deref()));
    println!("{:<10} {}", "Status:", customer.status);
    println!("{:<10} {}", "Joined:", date_cell(customer.join_date.as_deref()));
    Ok(())
}

/// Update fields of the logged-in user's profile
pub async fn cmd_profile_edit(
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    if username.is_none() && email.is_none() && phone.is_none() {
        return Err(RolodexError::Validation(
            "nothing to update; pass --username, --email, or --phone".to_string(),
        ));
    }

    let (api, session, _config) = client()?;
    let current = api.get_customer(session.user_id).await?;

    let update = CustomerUpdate {
        username: username.unwrap_or(current.username),
        email: email.unwrap_or(current.email),
        phone: phone.or(current.phone),
        status: current.status,
    };

    if !update.email.contains('@') {
        return Err(RolodexError::Validation(format!(
            "'{}' is not a valid email address",
            update.email
        )));
    }

    let customer = api.update_profile(session.user_id, &update).await?;
    println!("Profile updated for {}.", customer.username.bold());
    Ok(())
}
