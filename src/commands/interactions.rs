//! Interaction commands: the customer's own log plus the admin queue

use owo_colors::OwoColorize;

use crate::api::types::{InteractionKind, InteractionStatus, NewInteraction};
use crate::api::CrmApi;
use crate::error::{Result, RolodexError};
use crate::formatting::date_cell;
use crate::query::PageResult;
use crate::resource::{Record, Resource};
use crate::session::Role;

use super::{
    build_list_query, client, colorize_status, print_no_data, print_page_footer, print_table,
    ListOptions,
};

/// List the logged-in customer's interactions
pub async fn cmd_interactions_ls(options: ListOptions) -> Result<()> {
    let (api, session, config) = client()?;
    let resource = Resource::Interactions;

    if let Some(filter) = &options.filter {
        let allowed = resource.filter_options();
        if !allowed.contains(&filter.as_str()) {
            return Err(RolodexError::Other(format!(
                "unknown interaction type '{}', expected one of: {}",
                filter,
                allowed.join(", ")
            )));
        }
    }

    let query = build_list_query(resource, &options)?;
    let params = query.params(config.page_size, resource.filter_key());
    let page: PageResult<_> = api
        .list_interactions(session.user_id, &params)
        .await?
        .into();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
        return Ok(());
    }

    if page.is_empty() {
        print_no_data("interactions");
        return Ok(());
    }

    let records: Vec<Record> = page
        .items
        .iter()
        .cloned()
        .map(Record::Interaction)
        .collect();
    print_table(resource, &records);
    print_page_footer(&page, query.page);
    Ok(())
}

/// Log a new interaction for the logged-in customer
pub async fn cmd_interaction_add(
    kind: InteractionKind,
    subject: String,
    notes: Option<String>,
) -> Result<()> {
    if subject.is_empty() {
        return Err(RolodexError::Validation("subject is required".to_string()));
    }

    let (api, session, _config) = client()?;
    let interaction = api
        .add_interaction(
            session.user_id,
            &NewInteraction {
                kind,
                subject,
                notes,
            },
        )
        .await?;

    println!(
        "Logged {} interaction {} (id {})",
        interaction.kind,
        interaction.subject.bold(),
        interaction.id
    );
    Ok(())
}

/// List interactions awaiting review (admin)
pub async fn cmd_interactions_pending(json: bool) -> Result<()> {
    let (api, session, _config) = client()?;
    if session.role != Role::Admin {
        return Err(RolodexError::Auth(
            "the pending queue requires an admin session".to_string(),
        ));
    }

    let pending = api.pending_interactions().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pending)?);
        return Ok(());
    }

    if pending.is_empty() {
        print_no_data("pending interactions");
        return Ok(());
    }

    for interaction in &pending {
        println!(
            "{:6} {:10} {:9} {} [{}]",
            interaction.id.to_string().cyan(),
            date_cell(interaction.date.as_deref()),
            interaction.kind.to_string(),
            interaction.subject,
            colorize_status(&interaction.status.to_string()),
        );
    }
    Ok(())
}

/// Update the review status of an interaction (admin)
pub async fn cmd_interaction_set_status(id: i64, status: InteractionStatus) -> Result<()> {
    let (api, _session, _config) = client()?;
    api.set_interaction_status(id, status).await?;
    println!("Interaction {id} marked {status}.");
    Ok(())
}
