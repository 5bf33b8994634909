//! Admin customer management commands

use owo_colors::OwoColorize;

use crate::api::types::{CustomerStatus, CustomerUpdate, NewCustomer};
use crate::api::CrmApi;
use crate::error::{Result, RolodexError};
use crate::query::PageResult;
use crate::resource::{Record, Resource};

use super::{
    build_list_query, client, confirm, print_no_data, print_page_footer, print_table,
    ListOptions,
};

/// List customers with search, sort, and pagination
pub async fn cmd_customers_ls(options: ListOptions) -> Result<()> {
    let (api, _session, config) = client()?;
    let resource = Resource::Customers;

    let query = build_list_query(resource, &options)?;
    let params = query.params(config.page_size, resource.filter_key());
    let page: PageResult<_> = api.list_customers(&params).await?.into();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
        return Ok(());
    }

    if page.is_empty() {
        print_no_data("customers");
        return Ok(());
    }

    let records: Vec<Record> = page.items.iter().cloned().map(Record::Customer).collect();
    print_table(resource, &records);
    print_page_footer(&page, query.page);
    Ok(())
}

/// Create a customer account
pub async fn cmd_customer_add(
    username: String,
    email: String,
    password: String,
    phone: Option<String>,
) -> Result<()> {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(RolodexError::Validation(
            "username, email, and password are required".to_string(),
        ));
    }
    if !email.contains('@') {
        return Err(RolodexError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }

    let (api, _session, _config) = client()?;
    let customer = api
        .create_customer(&NewCustomer {
            username,
            email,
            password,
            phone,
        })
        .await?;

    println!("Added customer {} (id {})", customer.username.bold(), customer.id);
    Ok(())
}

/// Update a customer's details
pub async fn cmd_customer_edit(
    id: i64,
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    status: Option<CustomerStatus>,
) -> Result<()> {
    let (api, _session, _config) = client()?;

    // Fetch current state so unspecified fields keep their values; the
    // backend expects a full replacement body.
    let current = api.get_customer(id).await?;
    let update = CustomerUpdate {
        username: username.unwrap_or(current.username),
        email: email.unwrap_or(current.email),
        phone: phone.or(current.phone),
        status: status.unwrap_or(current.status),
    };

    if update.username.is_empty() || update.email.is_empty() {
        return Err(RolodexError::Validation(
            "username and email are required".to_string(),
        ));
    }

    let customer = api.update_customer(id, &update).await?;
    println!("Updated customer {} (id {})", customer.username.bold(), customer.id);
    Ok(())
}

/// Delete a customer after confirmation
pub async fn cmd_customer_rm(id: i64, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete customer {id}? This cannot be undone"))? {
        println!("Aborted.");
        return Ok(());
    }

    let (api, _session, _config) = client()?;
    api.delete_customer(id).await?;
    println!("Deleted customer {id}.");
    Ok(())
}

/// List customers awaiting approval
pub async fn cmd_customers_pending(json: bool) -> Result<()> {
    let (api, _session, _config) = client()?;
    let pending = api.pending_customers().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pending)?);
        return Ok(());
    }

    if pending.is_empty() {
        print_no_data("pending customers");
        return Ok(());
    }

    for customer in &pending {
        println!(
            "{:6} {} <{}>",
            customer.id.to_string().cyan(),
            customer.username,
            customer.email
        );
    }
    Ok(())
}

/// Approve a pending registration
pub async fn cmd_customer_approve(id: i64) -> Result<()> {
    let (api, _session, _config) = client()?;
    api.approve_customer(id).await?;
    println!("Approved customer {id}.");
    Ok(())
}

/// Reject a pending registration
pub async fn cmd_customer_reject(id: i64, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Reject customer {id}?"))? {
        println!("Aborted.");
        return Ok(());
    }

    let (api, _session, _config) = client()?;
    api.reject_customer(id).await?;
    println!("Rejected customer {id}.");
    Ok(())
}
