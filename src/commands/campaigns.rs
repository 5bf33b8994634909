//! Campaign commands.
//!
//! Admins manage the campaign catalog; customers get a read-only view of
//! the campaigns they were included in.

use owo_colors::OwoColorize;

use crate::api::types::{
    CampaignDraft, CampaignStatus, CustomerCampaignDraft, CustomerCampaignStatus,
};
use crate::api::CrmApi;
use crate::error::{Result, RolodexError};
use crate::query::PageResult;
use crate::resource::{Record, Resource};
use crate::session::Role;

use super::{
    build_list_query, client, confirm, print_no_data, print_page_footer, print_table,
    ListOptions,
};

/// List campaigns: the paginated catalog for admins, the customer's own
/// (unpaginated) campaigns otherwise
pub async fn cmd_campaigns_ls(options: ListOptions) -> Result<()> {
    let (api, session, config) = client()?;
    let resource = Resource::Campaigns;

    if session.role == Role::Customer {
        let campaigns = api.my_campaigns(session.user_id).await?;
        if options.json {
            println!("{}", serde_json::to_string_pretty(&campaigns)?);
            return Ok(());
        }
        if campaigns.is_empty() {
            print_no_data("campaigns");
            return Ok(());
        }
        let records: Vec<Record> = campaigns.iter().cloned().map(Record::Campaign).collect();
        print_table(resource, &records);
        return Ok(());
    }

    let query = build_list_query(resource, &options)?;
    let params = query.params(config.page_size, resource.filter_key());
    let page: PageResult<_> = api.list_campaigns(&params).await?.into();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
        return Ok(());
    }

    if page.is_empty() {
        print_no_data("campaigns");
        return Ok(());
    }

    let records: Vec<Record> = page.items.iter().cloned().map(Record::Campaign).collect();
    print_table(resource, &records);
    print_page_footer(&page, query.page);
    Ok(())
}

/// Create a campaign as a draft
pub async fn cmd_campaign_add(name: String, subject: String) -> Result<()> {
    if name.is_empty() || subject.is_empty() {
        return Err(RolodexError::Validation(
            "name and subject are required".to_string(),
        ));
    }

    let (api, _session, _config) = client()?;
    let campaign = api
        .create_campaign(&CampaignDraft {
            name,
            subject,
            status: CampaignStatus::Draft,
        })
        .await?;

    println!("Created campaign {} (id {})", campaign.name.bold(), campaign.id);
    Ok(())
}

/// Update a campaign's name, subject, or status
pub async fn cmd_campaign_edit(
    id: i64,
    name: Option<String>,
    subject: Option<String>,
    status: Option<CampaignStatus>,
) -> Result<()> {
    let (api, _session, config) = client()?;

    // The backend wants a full body; look the campaign up on the current
    // page list since there is no single-campaign endpoint.
    let resource = Resource::Campaigns;
    let mut found = None;
    let mut page_index = 0;
    loop {
        let mut probe = build_list_query(resource, &ListOptions::default())?;
        probe.set_page(page_index, None);
        let params = probe.params(config.page_size, resource.filter_key());
        let page: PageResult<_> = api.list_campaigns(&params).await?.into();
        if let Some(campaign) = page.items.iter().find(|c| c.id == id) {
            found = Some(campaign.clone());
            break;
        }
        page_index += 1;
        if page_index >= page.total_pages {
            break;
        }
    }

    let current = found.ok_or_else(|| RolodexError::NotFound(format!("campaign {id}")))?;
    let draft = CampaignDraft {
        name: name.unwrap_or(current.name),
        subject: subject.unwrap_or(current.subject),
        status: status.unwrap_or(current.status),
    };

    if draft.name.is_empty() || draft.subject.is_empty() {
        return Err(RolodexError::Validation(
            "name and subject are required".to_string(),
        ));
    }

    let campaign = api.update_campaign(id, &draft).await?;
    println!("Updated campaign {} (id {})", campaign.name.bold(), campaign.id);
    Ok(())
}

/// Delete a campaign after confirmation
pub async fn cmd_campaign_rm(id: i64, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete campaign {id}? This cannot be undone"))? {
        println!("Aborted.");
        return Ok(());
    }

    let (api, _session, _config) = client()?;
    api.delete_campaign(id).await?;
    println!("Deleted campaign {id}.");
    Ok(())
}

/// Propose a campaign for admin review (customer)
pub async fn cmd_campaign_submit(title: String, description: Option<String>) -> Result<()> {
    if title.is_empty() {
        return Err(RolodexError::Validation("title is required".to_string()));
    }

    let (api, session, _config) = client()?;
    let campaign = api
        .submit_campaign(
            session.user_id,
            &CustomerCampaignDraft { title, description },
        )
        .await?;

    println!(
        "Submitted campaign {} (id {}) for review.",
        campaign.title.bold(),
        campaign.id
    );
    Ok(())
}

/// List the customer's own campaign proposals and their review state
pub async fn cmd_campaign_submissions(json: bool) -> Result<()> {
    let (api, session, _config) = client()?;
    let submissions = api.my_submitted_campaigns(session.user_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&submissions)?);
        return Ok(());
    }

    if submissions.is_empty() {
        print_no_data("campaign submissions");
        return Ok(());
    }

    for campaign in &submissions {
        println!(
            "{:6} {:9} {}",
            campaign.id.to_string().cyan(),
            campaign.status.to_string(),
            campaign.title
        );
    }
    Ok(())
}

/// List customer-submitted campaigns awaiting review (admin)
pub async fn cmd_campaign_queue(json: bool) -> Result<()> {
    let (api, session, _config) = client()?;
    if session.role != Role::Admin {
        return Err(RolodexError::Auth(
            "the review queue requires an admin session".to_string(),
        ));
    }

    let pending = api.pending_customer_campaigns().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pending)?);
        return Ok(());
    }

    if pending.is_empty() {
        print_no_data("pending campaign submissions");
        return Ok(());
    }

    for campaign in &pending {
        let author = campaign
            .customer
            .as_ref()
            .map(|c| c.username.as_str())
            .unwrap_or("unknown");
        println!(
            "{:6} {} (submitted by {})",
            campaign.id.to_string().cyan(),
            campaign.title,
            author
        );
        if let Some(description) = &campaign.description {
            println!("       {description}");
        }
    }
    Ok(())
}

/// Approve or reject a customer-submitted campaign (admin)
pub async fn cmd_campaign_review(id: i64, approve: bool) -> Result<()> {
    let (api, _session, _config) = client()?;
    let status = if approve {
        CustomerCampaignStatus::Approved
    } else {
        CustomerCampaignStatus::Rejected
    };
    api.set_customer_campaign_status(id, status).await?;
    println!(
        "Campaign {id} {}.",
        if approve { "approved" } else { "rejected" }
    );
    Ok(())
}
