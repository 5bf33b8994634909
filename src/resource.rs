//! Collection-view descriptors.
//!
//! Each browsable collection (customers, interactions, campaigns) is
//! described once: its columns, which of them sort, its filter axis, and
//! how a record projects into display cells. The console tabs and the
//! non-interactive `ls` commands both render through these descriptors, so
//! the query behavior cannot drift between surfaces.

use crate::api::types::{Campaign, Customer, Interaction};
use crate::error::{Result, RolodexError};
use crate::formatting::{date_cell, rate_cell, text_cell};
use crate::query::{FILTER_ALL, SortDirection};
use crate::session::Role;

/// A browsable backend collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Customers,
    Interactions,
    Campaigns,
}

/// One table column
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub title: &'static str,
    /// Backend sort key; `None` for unsortable columns
    pub sort_key: Option<&'static str>,
    /// Display width in characters
    pub width: usize,
}

const CUSTOMER_COLUMNS: &[Column] = &[
    Column { title: "Username", sort_key: Some("username"), width: 18 },
    Column { title: "Email", sort_key: Some("email"), width: 28 },
    Column { title: "Phone", sort_key: None, width: 14 },
    Column { title: "Status", sort_key: Some("status"), width: 9 },
    Column { title: "Joined", sort_key: Some("joinDate"), width: 12 },
];

const INTERACTION_COLUMNS: &[Column] = &[
    Column { title: "Date", sort_key: Some("date"), width: 18 },
    Column { title: "Type", sort_key: None, width: 9 },
    Column { title: "Subject", sort_key: Some("subject"), width: 30 },
    Column { title: "Status", sort_key: Some("status"), width: 11 },
    Column { title: "Notes", sort_key: None, width: 24 },
];

const CAMPAIGN_COLUMNS: &[Column] = &[
    Column { title: "Name", sort_key: Some("name"), width: 22 },
    Column { title: "Subject", sort_key: None, width: 26 },
    Column { title: "Status", sort_key: Some("status"), width: 10 },
    Column { title: "Recipients", sort_key: None, width: 11 },
    Column { title: "Open Rate", sort_key: None, width: 10 },
    Column { title: "Created", sort_key: Some("createdAt"), width: 12 },
];

/// Values for the interactions type filter, `all` first
pub const INTERACTION_FILTERS: &[&str] = &[FILTER_ALL, "call", "email", "meeting", "other"];

impl Resource {
    pub fn title(self) -> &'static str {
        match self {
            Resource::Customers => "Customers",
            Resource::Interactions => "Interactions",
            Resource::Campaigns => "Campaigns",
        }
    }

    pub fn columns(self) -> &'static [Column] {
        match self {
            Resource::Customers => CUSTOMER_COLUMNS,
            Resource::Interactions => INTERACTION_COLUMNS,
            Resource::Campaigns => CAMPAIGN_COLUMNS,
        }
    }

    /// Sort keys accepted by the backend for this collection
    pub fn sort_fields(self) -> Vec<&'static str> {
        self.columns()
            .iter()
            .filter_map(|column| column.sort_key)
            .collect()
    }

    pub fn default_sort(self) -> (&'static str, SortDirection) {
        match self {
            Resource::Customers => ("username", SortDirection::Asc),
            Resource::Interactions => ("date", SortDirection::Desc),
            Resource::Campaigns => ("createdAt", SortDirection::Desc),
        }
    }

    /// Query-parameter name of the filter axis, if the view has one
    pub fn filter_key(self) -> Option<&'static str> {
        match self {
            Resource::Interactions => Some("type"),
            _ => None,
        }
    }

    pub fn filter_options(self) -> &'static [&'static str] {
        match self {
            Resource::Interactions => INTERACTION_FILTERS,
            _ => &[],
        }
    }

    /// Whether the backend supports free-text search on this collection
    pub fn supports_search(self) -> bool {
        !matches!(self, Resource::Campaigns)
    }

    /// Validate a user-supplied sort key
    pub fn check_sort_field(self, field: &str) -> Result<()> {
        if self.sort_fields().contains(&field) {
            return Ok(());
        }
        Err(RolodexError::Other(format!(
            "unknown sort field '{}' for {}, expected one of: {}",
            field,
            self.title().to_lowercase(),
            self.sort_fields().join(", ")
        )))
    }

    /// Tabs available to a role, in display order
    pub fn available_for(role: Role) -> Vec<Resource> {
        match role {
            Role::Admin => vec![Resource::Customers, Resource::Campaigns],
            Role::Customer => vec![Resource::Interactions, Resource::Campaigns],
        }
    }
}

/// A row of whichever collection is active
#[derive(Debug, Clone)]
pub enum Record {
    Customer(Customer),
    Interaction(Interaction),
    Campaign(Campaign),
}

impl Record {
    pub fn id(&self) -> i64 {
        match self {
            Record::Customer(c) => c.id,
            Record::Interaction(i) => i.id,
            Record::Campaign(c) => c.id,
        }
    }

    /// Short human label for toasts and confirm prompts
    pub fn label(&self) -> String {
        match self {
            Record::Customer(c) => c.username.clone(),
            Record::Interaction(i) => i.subject.clone(),
            Record::Campaign(c) => c.name.clone(),
        }
    }

    /// Project into display cells, one per column of the owning resource
    pub fn cells(&self) -> Vec<String> {
        match self {
            Record::Customer(c) => vec![
                c.username.clone(),
                c.email.clone(),
                text_cell(c.phone.as_deref()),
                c.status.to_string(),
                date_cell(c.join_date.as_deref()),
            ],
            Record::Interaction(i) => vec![
                date_cell(i.date.as_deref()),
                i.kind.to_string(),
                i.subject.clone(),
                i.status.to_string(),
                text_cell(i.notes.as_deref()),
            ],
            Record::Campaign(c) => vec![
                c.name.clone(),
                c.subject.clone(),
                c.status.to_string(),
                c.recipients
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                rate_cell(c.open_rate),
                date_cell(c.created_at.as_deref()),
            ],
        }
    }
}
