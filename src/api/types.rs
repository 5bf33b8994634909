//! Wire types for the CRM REST API.
//!
//! Shapes here mirror the backend's JSON exactly (camelCase field names);
//! the console treats records as opaque rows and only formats them for
//! display.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One page of a collection response.
///
/// The backend sends additional bookkeeping fields (`totalElements`,
/// `number`, ...); only the ones the console consumes are modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
        }
    }
}

/// Account state of a customer record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerStatus {
    Active,
    Pending,
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerStatus::Active => write!(f, "ACTIVE"),
            CustomerStatus::Pending => write!(f, "PENDING"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: CustomerStatus,
    /// ISO 8601 timestamp as sent by the backend
    #[serde(default)]
    pub join_date: Option<String>,
}

/// Payload for creating a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Payload for updating a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: CustomerStatus,
}

/// Channel through which an interaction happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Call,
    Email,
    Meeting,
    Other,
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionKind::Call => write!(f, "call"),
            InteractionKind::Email => write!(f, "email"),
            InteractionKind::Meeting => write!(f, "meeting"),
            InteractionKind::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionStatus {
    Completed,
    Scheduled,
    Pending,
}

impl fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionStatus::Completed => write!(f, "completed"),
            InteractionStatus::Scheduled => write!(f, "scheduled"),
            InteractionStatus::Pending => write!(f, "pending"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub subject: String,
    #[serde(default)]
    pub date: Option<String>,
    pub status: InteractionStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for logging a new interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInteraction {
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub subject: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Sent,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "draft"),
            CampaignStatus::Scheduled => write!(f, "scheduled"),
            CampaignStatus::Sent => write!(f, "sent"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub status: CampaignStatus,
    #[serde(default)]
    pub recipients: Option<u32>,
    #[serde(default)]
    pub open_rate: Option<u32>,
    #[serde(default)]
    pub click_rate: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub sent_at: Option<String>,
}

/// Payload for creating or updating a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub name: String,
    pub subject: String,
    pub status: CampaignStatus,
}

/// Review state of a customer-submitted campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerCampaignStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for CustomerCampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerCampaignStatus::Pending => write!(f, "PENDING"),
            CustomerCampaignStatus::Approved => write!(f, "APPROVED"),
            CustomerCampaignStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// The submitting customer, as embedded in a customer campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignAuthor {
    pub username: String,
}

/// A campaign proposed by a customer, awaiting admin review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCampaign {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: CustomerCampaignStatus,
    #[serde(default)]
    pub customer: Option<CampaignAuthor>,
}

/// Payload for submitting a campaign proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCampaignDraft {
    pub title: String,
    pub description: Option<String>,
}

/// System settings, stored by the backend as three opaque JSON documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub general_settings: String,
    #[serde(default)]
    pub email_settings: String,
    #[serde(default)]
    pub security_settings: String,
}

/// One point of the cumulative customer-growth series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub date: String,
    pub count: u64,
}

/// Admin dashboard summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub total_customers: u64,
    #[serde(default)]
    pub active_customers: u64,
    #[serde(default)]
    pub total_interactions: u64,
    #[serde(default)]
    pub conversion_rate: u32,
    #[serde(default)]
    pub customer_growth: Vec<GrowthPoint>,
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Login response body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i64,
    #[serde(default)]
    pub role: Option<String>,
}
