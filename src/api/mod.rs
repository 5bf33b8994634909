//! CRM backend API module.
//!
//! This module defines the client-side interface to the CRM REST backend
//! and its `reqwest` implementation. Everything above this layer (query
//! controller, console, commands) talks to the backend exclusively through
//! the [`CrmApi`] trait, so tests can substitute an in-memory backend.

pub mod http;
pub mod types;

use crate::error::Result;
use crate::query::PageParams;

pub use http::HttpApi;
pub use types::{
    AnalyticsSummary, AuthRequest, AuthResponse, Campaign, CampaignDraft, CampaignStatus,
    Customer, CustomerCampaign, CustomerCampaignDraft, CustomerCampaignStatus, CustomerStatus,
    CustomerUpdate, Interaction, InteractionKind, InteractionStatus, NewCustomer, NewInteraction,
    Page, Settings,
};

/// Common interface to the CRM backend
pub trait CrmApi: Send + Sync {
    /// Authenticate and obtain a bearer token
    fn login(
        &self,
        request: &AuthRequest,
    ) -> impl std::future::Future<Output = Result<AuthResponse>> + Send;

    // Admin: customer management

    fn list_customers(
        &self,
        params: &PageParams,
    ) -> impl std::future::Future<Output = Result<Page<Customer>>> + Send;

    fn create_customer(
        &self,
        customer: &NewCustomer,
    ) -> impl std::future::Future<Output = Result<Customer>> + Send;

    fn update_customer(
        &self,
        id: i64,
        update: &CustomerUpdate,
    ) -> impl std::future::Future<Output = Result<Customer>> + Send;

    fn delete_customer(&self, id: i64) -> impl std::future::Future<Output = Result<()>> + Send;

    fn pending_customers(&self)
    -> impl std::future::Future<Output = Result<Vec<Customer>>> + Send;

    fn approve_customer(&self, id: i64) -> impl std::future::Future<Output = Result<()>> + Send;

    fn reject_customer(&self, id: i64) -> impl std::future::Future<Output = Result<()>> + Send;

    // Admin: campaigns

    fn list_campaigns(
        &self,
        params: &PageParams,
    ) -> impl std::future::Future<Output = Result<Page<Campaign>>> + Send;

    fn create_campaign(
        &self,
        draft: &CampaignDraft,
    ) -> impl std::future::Future<Output = Result<Campaign>> + Send;

    fn update_campaign(
        &self,
        id: i64,
        draft: &CampaignDraft,
    ) -> impl std::future::Future<Output = Result<Campaign>> + Send;

    fn delete_campaign(&self, id: i64) -> impl std::future::Future<Output = Result<()>> + Send;

    // Admin: moderation queues

    fn pending_interactions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Interaction>>> + Send;

    fn pending_customer_campaigns(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<CustomerCampaign>>> + Send;

    fn set_customer_campaign_status(
        &self,
        id: i64,
        status: CustomerCampaignStatus,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn set_interaction_status(
        &self,
        id: i64,
        status: InteractionStatus,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    // Admin: settings and analytics

    fn get_settings(&self) -> impl std::future::Future<Output = Result<Settings>> + Send;

    fn update_settings(
        &self,
        settings: &Settings,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn analytics(&self) -> impl std::future::Future<Output = Result<AnalyticsSummary>> + Send;

    // Customer: own records

    fn get_customer(&self, id: i64) -> impl std::future::Future<Output = Result<Customer>> + Send;

    fn update_profile(
        &self,
        id: i64,
        update: &CustomerUpdate,
    ) -> impl std::future::Future<Output = Result<Customer>> + Send;

    fn list_interactions(
        &self,
        customer_id: i64,
        params: &PageParams,
    ) -> impl std::future::Future<Output = Result<Page<Interaction>>> + Send;

    fn add_interaction(
        &self,
        customer_id: i64,
        interaction: &NewInteraction,
    ) -> impl std::future::Future<Output = Result<Interaction>> + Send;

    fn my_campaigns(
        &self,
        customer_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Campaign>>> + Send;

    fn submit_campaign(
        &self,
        customer_id: i64,
        draft: &CustomerCampaignDraft,
    ) -> impl std::future::Future<Output = Result<CustomerCampaign>> + Send;

    fn my_submitted_campaigns(
        &self,
        customer_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<CustomerCampaign>>> + Send;

    /// Customer-scoped analytics; the backend returns a free-form document
    fn customer_analytics(
        &self,
        customer_id: i64,
    ) -> impl std::future::Future<Output = Result<serde_json::Value>> + Send;
}
