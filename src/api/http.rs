//! `reqwest`-backed implementation of [`CrmApi`].
//!
//! The bearer token is installed as a default header at construction time
//! (marked sensitive so it never shows up in request logs). Status handling
//! mirrors the product's conventions: 401/403 invalidate the stored session
//! and surface as [`RolodexError::SessionExpired`]; other non-success
//! statuses carry the backend's `message` field when one is present.
//!
//! No timeout is configured here; the view layer supersedes slow requests
//! instead of cancelling them.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::api::types::*;
use crate::api::CrmApi;
use crate::config::Config;
use crate::error::{Result, RolodexError};
use crate::query::PageParams;
use crate::session::Session;

/// HTTP client for the CRM backend
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    /// Build a client from configuration and an optional session.
    ///
    /// The session is injected rather than loaded here so callers (and
    /// tests) decide where authentication state comes from. Login is the
    /// only operation that works without one.
    pub fn new(config: &Config, session: Option<&Session>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        if let Some(session) = session {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", session.token()))
                .map_err(|_| RolodexError::Auth("token contains invalid characters".to_string()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RolodexError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base: config.base_url()?,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        let joined = format!("{}/{}", self.base.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|_| RolodexError::InvalidBaseUrl(joined))
    }

    /// Map a non-success response to an error.
    ///
    /// 401/403 mean the token is stale: the persisted session is cleared so
    /// the next invocation starts from the login prompt, matching the
    /// product's global session-expiry handling.
    async fn check(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            // Best effort; the auth failure is the error to report.
            let _ = Session::clear();
            return Err(RolodexError::SessionExpired);
        }

        let body = response.text().await.unwrap_or_default();
        Err(RolodexError::Server {
            status: status.as_u16(),
            message: extract_message(&body),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&PageParams>,
    ) -> Result<T> {
        let url = self.url(path)?;
        debug!(%url, "GET");

        let mut request = self.client.get(url);
        if let Some(params) = query {
            request = request.query(&params.as_query());
        }

        let response = self.check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path)?;
        debug!(%url, "POST");

        let response = self
            .check(self.client.post(url).json(body).send().await?)
            .await?;
        Ok(response.json().await?)
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path)?;
        debug!(%url, "PUT");

        let response = self
            .check(self.client.put(url).json(body).send().await?)
            .await?;
        Ok(response.json().await?)
    }

    async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path)?;
        debug!(%url, "PUT");

        self.check(self.client.put(url).json(body).send().await?)
            .await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path)?;
        debug!(%url, "DELETE");

        self.check(self.client.delete(url).send().await?).await?;
        Ok(())
    }
}

/// Pull the human-readable `message` out of an error body, falling back to
/// the raw text.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = value.get("message").and_then(|m| m.as_str())
    {
        return message.to_string();
    }
    if body.trim().is_empty() {
        return "request failed".to_string();
    }
    body.trim().to_string()
}

impl CrmApi for HttpApi {
    async fn login(&self, request: &AuthRequest) -> Result<AuthResponse> {
        let url = self.url("auth/login")?;
        debug!(%url, "POST");

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RolodexError::Auth("invalid credentials".to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RolodexError::Server {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }
        Ok(response.json().await?)
    }

    async fn list_customers(&self, params: &PageParams) -> Result<Page<Customer>> {
        self.get_json("admin/customers", Some(params)).await
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer> {
        self.post_json("admin/customers", customer).await
    }

    async fn update_customer(&self, id: i64, update: &CustomerUpdate) -> Result<Customer> {
        self.put_json(&format!("admin/customers/{id}"), update).await
    }

    async fn delete_customer(&self, id: i64) -> Result<()> {
        self.delete(&format!("admin/customers/{id}")).await
    }

    async fn pending_customers(&self) -> Result<Vec<Customer>> {
        self.get_json("admin/customers/pending", None).await
    }

    async fn approve_customer(&self, id: i64) -> Result<()> {
        self.put_unit(&format!("admin/customers/{id}/approve"), &serde_json::json!({}))
            .await
    }

    async fn reject_customer(&self, id: i64) -> Result<()> {
        self.delete(&format!("admin/customers/{id}/reject")).await
    }

    async fn list_campaigns(&self, params: &PageParams) -> Result<Page<Campaign>> {
        self.get_json("admin/campaigns", Some(params)).await
    }

    async fn create_campaign(&self, draft: &CampaignDraft) -> Result<Campaign> {
        self.post_json("admin/campaigns", draft).await
    }

    async fn update_campaign(&self, id: i64, draft: &CampaignDraft) -> Result<Campaign> {
        self.put_json(&format!("admin/campaigns/{id}"), draft).await
    }

    async fn delete_campaign(&self, id: i64) -> Result<()> {
        self.delete(&format!("admin/campaigns/{id}")).await
    }

    async fn pending_interactions(&self) -> Result<Vec<Interaction>> {
        self.get_json("admin/interactions/pending", None).await
    }

    async fn pending_customer_campaigns(&self) -> Result<Vec<CustomerCampaign>> {
        self.get_json("admin/customer-campaigns/pending", None).await
    }

    async fn set_customer_campaign_status(
        &self,
        id: i64,
        status: CustomerCampaignStatus,
    ) -> Result<()> {
        self.put_unit(
            &format!("admin/customer-campaigns/{id}/status"),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    async fn set_interaction_status(&self, id: i64, status: InteractionStatus) -> Result<()> {
        self.put_unit(
            &format!("admin/interactions/{id}/status"),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    async fn get_settings(&self) -> Result<Settings> {
        self.get_json("admin/settings", None).await
    }

    async fn update_settings(&self, settings: &Settings) -> Result<()> {
        self.put_unit("admin/settings", settings).await
    }

    async fn analytics(&self) -> Result<AnalyticsSummary> {
        self.get_json("admin/analytics", None).await
    }

    async fn get_customer(&self, id: i64) -> Result<Customer> {
        self.get_json(&format!("customers/{id}"), None).await
    }

    async fn update_profile(&self, id: i64, update: &CustomerUpdate) -> Result<Customer> {
        self.put_json(&format!("customers/{id}"), update).await
    }

    async fn list_interactions(
        &self,
        customer_id: i64,
        params: &PageParams,
    ) -> Result<Page<Interaction>> {
        self.get_json(&format!("customers/{customer_id}/interactions"), Some(params))
            .await
    }

    async fn add_interaction(
        &self,
        customer_id: i64,
        interaction: &NewInteraction,
    ) -> Result<Interaction> {
        self.post_json(&format!("customers/{customer_id}/interactions"), interaction)
            .await
    }

    async fn my_campaigns(&self, customer_id: i64) -> Result<Vec<Campaign>> {
        self.get_json(&format!("customers/{customer_id}/campaigns"), None)
            .await
    }

    async fn submit_campaign(
        &self,
        customer_id: i64,
        draft: &CustomerCampaignDraft,
    ) -> Result<CustomerCampaign> {
        self.post_json(&format!("customers/{customer_id}/campaigns"), draft)
            .await
    }

    async fn my_submitted_campaigns(&self, customer_id: i64) -> Result<Vec<CustomerCampaign>> {
        self.get_json(&format!("customers/{customer_id}/customer-campaigns"), None)
            .await
    }

    async fn customer_analytics(&self, customer_id: i64) -> Result<serde_json::Value> {
        self.get_json(&format!("customers/{customer_id}/analytics"), None)
            .await
    }
}
