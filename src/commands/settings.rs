//! System settings commands (admin)

use crate::api::CrmApi;
use crate::error::{Result, RolodexError};

use super::client;

/// The three settings sections the backend stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    General,
    Email,
    Security,
}

impl std::str::FromStr for SettingsSection {
    type Err = RolodexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "general" => Ok(SettingsSection::General),
            "email" => Ok(SettingsSection::Email),
            "security" => Ok(SettingsSection::Security),
            _ => Err(RolodexError::Other(format!(
                "unknown settings section '{}', expected general, email, or security",
                s
            ))),
        }
    }
}

/// Pretty-print one stored section, which is itself a JSON document
fn render_section(label: &str, raw: &str) {
    println!("[{label}]");
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default()),
        Err(_) if raw.is_empty() => println!("(empty)"),
        Err(_) => println!("{raw}"),
    }
    println!();
}

/// Show the system settings
pub async fn cmd_settings_show(json: bool) -> Result<()> {
    let (api, _session, _config) = client()?;
    let settings = api.get_settings().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    render_section("general", &settings.general_settings);
    render_section("email", &settings.email_settings);
    render_section("security", &settings.security_settings);
    Ok(())
}

/// Replace one settings section with the given JSON document
pub async fn cmd_settings_set(section: SettingsSection, value: String) -> Result<()> {
    // The backend stores sections verbatim; validate here so a typo does
    // not end up persisted.
    serde_json::from_str::<serde_json::Value>(&value)
        .map_err(|e| RolodexError::Validation(format!("settings value is not valid JSON: {e}")))?;

    let (api, _session, _config) = client()?;
    let mut settings = api.get_settings().await?;

    match section {
        SettingsSection::General => settings.general_settings = value,
        SettingsSection::Email => settings.email_settings = value,
        SettingsSection::Security => settings.security_settings = value,
    }

    api.update_settings(&settings).await?;
    println!("Settings updated.");
    Ok(())
}
