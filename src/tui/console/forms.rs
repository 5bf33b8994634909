//! Modal form state for create/edit dialogs.
//!
//! A form is a flat list of fields with one focus point. Submission
//! validates client-side and yields a typed [`MutationRequest`]; nothing
//! reaches the backend until validation passes. Cancelling discards the
//! form without side effects.

use crate::api::types::{
    Campaign, CampaignDraft, CampaignStatus, Customer, CustomerStatus, CustomerUpdate,
    InteractionKind, NewCustomer, NewInteraction,
};

use super::model::MutationRequest;

/// What a field edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Rendered masked; used for passwords
    Secret,
    /// One of a fixed set of options, cycled with Space
    Choice(&'static [&'static str]),
}

/// One editable field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    fn text(label: &'static str, value: &str, required: bool) -> Self {
        Self {
            label,
            value: value.to_string(),
            kind: FieldKind::Text,
            required,
        }
    }

    fn secret(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            kind: FieldKind::Secret,
            required: true,
        }
    }

    fn choice(label: &'static str, options: &'static [&'static str], value: &str) -> Self {
        Self {
            label,
            value: value.to_string(),
            kind: FieldKind::Choice(options),
            required: true,
        }
    }
}

/// Which record the form creates or edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    CreateCustomer,
    EditCustomer { id: i64 },
    CreateInteraction,
    CreateCampaign,
    EditCampaign { id: i64 },
}

const CUSTOMER_STATUSES: &[&str] = &["ACTIVE", "PENDING"];
const INTERACTION_KINDS: &[&str] = &["call", "email", "meeting", "other"];
const CAMPAIGN_STATUSES: &[&str] = &["draft", "scheduled", "sent"];

/// State of an open modal form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub focused: usize,
    /// Validation message from the last rejected submit
    pub error: Option<String>,
}

impl FormState {
    pub fn create_customer() -> Self {
        Self {
            kind: FormKind::CreateCustomer,
            title: "Add New Customer".to_string(),
            fields: vec![
                FormField::text("Username", "", true),
                FormField::text("Email", "", true),
                FormField::secret("Password"),
                FormField::text("Phone", "", false),
            ],
            focused: 0,
            error: None,
        }
    }

    pub fn edit_customer(customer: &Customer) -> Self {
        Self {
            kind: FormKind::EditCustomer { id: customer.id },
            title: "Edit Customer".to_string(),
            fields: vec![
                FormField::text("Username", &customer.username, true),
                FormField::text("Email", &customer.email, true),
                FormField::text("Phone", customer.phone.as_deref().unwrap_or(""), false),
                FormField::choice(
                    "Status",
                    CUSTOMER_STATUSES,
                    &customer.status.to_string(),
                ),
            ],
            focused: 0,
            error: None,
        }
    }

    pub fn create_interaction() -> Self {
        Self {
            kind: FormKind::CreateInteraction,
            title: "Add New Interaction".to_string(),
            fields: vec![
                FormField::text("Subject", "", true),
                FormField::choice("Type", INTERACTION_KINDS, "call"),
                FormField::text("Notes", "", false),
            ],
            focused: 0,
            error: None,
        }
    }

    pub fn create_campaign() -> Self {
        Self {
            kind: FormKind::CreateCampaign,
            title: "Create New Campaign".to_string(),
            fields: vec![
                FormField::text("Name", "", true),
                FormField::text("Subject", "", true),
            ],
            focused: 0,
            error: None,
        }
    }

    pub fn edit_campaign(campaign: &Campaign) -> Self {
        Self {
            kind: FormKind::EditCampaign { id: campaign.id },
            title: "Edit Campaign".to_string(),
            fields: vec![
                FormField::text("Name", &campaign.name, true),
                FormField::text("Subject", &campaign.subject, true),
                FormField::choice(
                    "Status",
                    CAMPAIGN_STATUSES,
                    &campaign.status.to_string(),
                ),
            ],
            focused: 0,
            error: None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    /// Overwrite a field's value (text input callback)
    pub fn set_value(&mut self, index: usize, value: String) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value;
        }
    }

    /// Advance the focused field to its next option, if it is a choice
    pub fn cycle_choice(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused)
            && let FieldKind::Choice(options) = field.kind
        {
            let current = options
                .iter()
                .position(|option| *option == field.value)
                .unwrap_or(0);
            field.value = options[(current + 1) % options.len()].to_string();
        }
    }

    fn value(&self, label: &str) -> String {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.trim().to_string())
            .unwrap_or_default()
    }

    fn optional(&self, label: &str) -> Option<String> {
        let value = self.value(label);
        if value.is_empty() { None } else { Some(value) }
    }

    /// Validate and convert into a mutation request.
    ///
    /// Returns the message to show in the form on failure, mirroring the
    /// required-field checks the product has always enforced client-side.
    pub fn submit(&self) -> Result<MutationRequest, String> {
        for field in &self.fields {
            if field.required && field.value.trim().is_empty() {
                return Err(format!("{} is required", field.label));
            }
        }

        match self.kind {
            FormKind::CreateCustomer | FormKind::EditCustomer { .. } => {
                let email = self.value("Email");
                if !email.contains('@') {
                    return Err(format!("'{email}' is not a valid email address"));
                }
            }
            _ => {}
        }

        Ok(match self.kind {
            FormKind::CreateCustomer => MutationRequest::CreateCustomer(NewCustomer {
                username: self.value("Username"),
                email: self.value("Email"),
                password: self.value("Password"),
                phone: self.optional("Phone"),
            }),
            FormKind::EditCustomer { id } => MutationRequest::UpdateCustomer {
                id,
                update: CustomerUpdate {
                    username: self.value("Username"),
                    email: self.value("Email"),
                    phone: self.optional("Phone"),
                    status: parse_customer_status(&self.value("Status")),
                },
            },
            FormKind::CreateInteraction => MutationRequest::CreateInteraction(NewInteraction {
                kind: parse_interaction_kind(&self.value("Type")),
                subject: self.value("Subject"),
                notes: self.optional("Notes"),
            }),
            FormKind::CreateCampaign => MutationRequest::CreateCampaign(CampaignDraft {
                name: self.value("Name"),
                subject: self.value("Subject"),
                status: CampaignStatus::Draft,
            }),
            FormKind::EditCampaign { id } => MutationRequest::UpdateCampaign {
                id,
                draft: CampaignDraft {
                    name: self.value("Name"),
                    subject: self.value("Subject"),
                    status: parse_campaign_status(&self.value("Status")),
                },
            },
        })
    }
}

fn parse_customer_status(value: &str) -> CustomerStatus {
    match value {
        "PENDING" => CustomerStatus::Pending,
        _ => CustomerStatus::Active,
    }
}

fn parse_interaction_kind(value: &str) -> InteractionKind {
    match value {
        "email" => InteractionKind::Email,
        "meeting" => InteractionKind::Meeting,
        "other" => InteractionKind::Other,
        _ => InteractionKind::Call,
    }
}

fn parse_campaign_status(value: &str) -> CampaignStatus {
    match value {
        "scheduled" => CampaignStatus::Scheduled,
        "sent" => CampaignStatus::Sent,
        _ => CampaignStatus::Draft,
    }
}
