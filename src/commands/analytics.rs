//! Analytics summaries for both roles

use owo_colors::OwoColorize;

use crate::api::CrmApi;
use crate::error::Result;
use crate::session::Role;

use super::client;

/// Print the dashboard numbers for the current role
pub async fn cmd_analytics(json: bool) -> Result<()> {
    let (api, session, _config) = client()?;

    if session.role == Role::Customer {
        // The customer endpoint returns a free-form document; print it as
        // formatted JSON either way.
        let document = api.customer_analytics(session.user_id).await?;
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    let summary = api.analytics().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{:<22} {}", "Total customers:", summary.total_customers.bold());
    println!("{:<22} {}", "Active customers:", summary.active_customers.bold());
    println!(
        "{:<22} {}",
        "Total interactions:",
        summary.total_interactions.bold()
    );
    println!(
        "{:<22} {}%",
        "Conversion rate:",
        summary.conversion_rate.bold()
    );

    if !summary.customer_growth.is_empty() {
        println!();
        println!("Customer growth:");
        for point in &summary.customer_growth {
            println!("  {:<10} {}", point.date, point.count);
        }
    }
    Ok(())
}
