//! Shared test fixtures: an in-memory CRM backend and a console harness
//! that wires the reducer, debouncer, and fetch sequencing together the
//! same way the view component does.

// Each test binary compiles this module independently; not every binary
// uses every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rolodex::api::types::*;
use rolodex::api::CrmApi;
use rolodex::error::{Result, RolodexError};
use rolodex::query::{Debouncer, FetchFailure, PageParams, PageResult};
use rolodex::resource::{Record, Resource};
use rolodex::session::Role;
use rolodex::tui::console::{ConsoleAction, ConsoleState, reduce_console_state};

pub const TEST_PAGE_SIZE: u32 = 10;

/// In-memory stand-in for the CRM backend.
///
/// List endpoints honor search, sort, filter, and pagination parameters
/// the way the real backend does, sleep for a configurable delay, and
/// record every parameter set they were called with.
pub struct MockApi {
    pub customers: Mutex<Vec<Customer>>,
    pub interactions: Mutex<Vec<Interaction>>,
    pub campaigns: Mutex<Vec<Campaign>>,
    /// Applied to every list call; change between calls to stage races
    pub list_delay: Mutex<Duration>,
    /// Per-call delays consumed before `list_delay`; lets a test give one
    /// request a different latency than the next
    pub delay_queue: Mutex<std::collections::VecDeque<Duration>>,
    /// Every PageParams a list endpoint received, in call order
    pub list_calls: Mutex<Vec<PageParams>>,
    /// When set, list calls fail with this status after the delay
    pub fail_with_status: Mutex<Option<u16>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            customers: Mutex::new(Vec::new()),
            interactions: Mutex::new(Vec::new()),
            campaigns: Mutex::new(Vec::new()),
            list_delay: Mutex::new(Duration::ZERO),
            delay_queue: Mutex::new(std::collections::VecDeque::new()),
            list_calls: Mutex::new(Vec::new()),
            fail_with_status: Mutex::new(None),
        }
    }
}

pub fn make_customer(id: i64, username: &str) -> Customer {
    Customer {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        phone: None,
        status: CustomerStatus::Active,
        join_date: Some(format!("2024-01-{:02}T00:00:00Z", (id % 27) + 1)),
    }
}

pub fn make_interaction(id: i64, kind: InteractionKind, subject: &str) -> Interaction {
    Interaction {
        id,
        kind,
        subject: subject.to_string(),
        date: Some(format!("2024-02-{:02}T09:00:00Z", (id % 27) + 1)),
        status: InteractionStatus::Completed,
        notes: None,
    }
}

pub fn make_campaign(id: i64, name: &str) -> Campaign {
    Campaign {
        id,
        name: name.to_string(),
        subject: format!("{name} subject"),
        status: CampaignStatus::Draft,
        recipients: Some(100),
        open_rate: Some(30),
        click_rate: Some(10),
        created_at: Some(format!("2024-03-{:02}T12:00:00Z", (id % 27) + 1)),
        sent_at: None,
    }
}

impl MockApi {
    pub fn with_customers(count: i64) -> Self {
        let api = Self::default();
        *api.customers.lock().unwrap() = (0..count)
            .map(|i| make_customer(i, &format!("user{i:02}")))
            .collect();
        api
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.list_delay.lock().unwrap() = delay;
    }

    /// Queue a latency for the next list call (FIFO)
    pub fn push_delay(&self, delay: Duration) {
        self.delay_queue.lock().unwrap().push_back(delay);
    }

    pub fn fail_next_lists(&self, status: Option<u16>) {
        *self.fail_with_status.lock().unwrap() = status;
    }

    /// Parameters of every recorded list call
    pub fn recorded_calls(&self) -> Vec<PageParams> {
        self.list_calls.lock().unwrap().clone()
    }

    async fn list_gate(&self, params: &PageParams) -> Result<()> {
        let delay = self
            .delay_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| *self.list_delay.lock().unwrap());
        self.list_calls.lock().unwrap().push(params.clone());
        tokio::time::sleep(delay).await;

        if let Some(status) = *self.fail_with_status.lock().unwrap() {
            return Err(RolodexError::Server {
                status,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

fn paginate<T: Clone>(items: Vec<T>, params: &PageParams) -> Page<T> {
    let size = params.size.max(1) as usize;
    let total_pages = items.len().div_ceil(size) as u32;
    let start = params.page as usize * size;
    let content = items.into_iter().skip(start).take(size).collect();
    Page {
        content,
        total_pages,
    }
}

fn sort_key(sort: &str) -> (String, bool) {
    let mut parts = sort.splitn(2, ',');
    let field = parts.next().unwrap_or_default().to_string();
    let descending = parts.next() == Some("desc");
    (field, descending)
}

impl CrmApi for MockApi {
    async fn login(&self, request: &AuthRequest) -> Result<AuthResponse> {
        if request.password == "secret" {
            Ok(AuthResponse {
                token: "tok-test".to_string(),
                user_id: 1,
                role: Some("admin".to_string()),
            })
        } else {
            Err(RolodexError::Auth("invalid credentials".to_string()))
        }
    }

    async fn list_customers(&self, params: &PageParams) -> Result<Page<Customer>> {
        self.list_gate(params).await?;

        let mut customers: Vec<Customer> = self
            .customers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| {
                params.search.is_empty()
                    || c.username
                        .to_lowercase()
                        .contains(&params.search.to_lowercase())
                    || c.email
                        .to_lowercase()
                        .contains(&params.search.to_lowercase())
            })
            .cloned()
            .collect();

        let (field, descending) = sort_key(&params.sort);
        customers.sort_by(|a, b| {
            let ordering = match field.as_str() {
                "email" => a.email.cmp(&b.email),
                "status" => a.status.to_string().cmp(&b.status.to_string()),
                "joinDate" => a.join_date.cmp(&b.join_date),
                _ => a.username.cmp(&b.username),
            };
            if descending { ordering.reverse() } else { ordering }
        });

        Ok(paginate(customers, params))
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer> {
        let mut customers = self.customers.lock().unwrap();
        if customers.iter().any(|c| c.username == customer.username) {
            return Err(RolodexError::Server {
                status: 409,
                message: "Username already taken".to_string(),
            });
        }
        let id = customers.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = Customer {
            id,
            username: customer.username.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            status: CustomerStatus::Pending,
            join_date: Some("2024-06-01T00:00:00Z".to_string()),
        };
        customers.push(created.clone());
        Ok(created)
    }

    async fn update_customer(&self, id: i64, update: &CustomerUpdate) -> Result<Customer> {
        let mut customers = self.customers.lock().unwrap();
        let customer = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RolodexError::NotFound(format!("customer {id}")))?;
        customer.username = update.username.clone();
        customer.email = update.email.clone();
        customer.phone = update.phone.clone();
        customer.status = update.status;
        Ok(customer.clone())
    }

    async fn delete_customer(&self, id: i64) -> Result<()> {
        let mut customers = self.customers.lock().unwrap();
        let before = customers.len();
        customers.retain(|c| c.id != id);
        if customers.len() == before {
            return Err(RolodexError::NotFound(format!("customer {id}")));
        }
        Ok(())
    }

    async fn pending_customers(&self) -> Result<Vec<Customer>> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.status == CustomerStatus::Pending)
            .cloned()
            .collect())
    }

    async fn approve_customer(&self, id: i64) -> Result<()> {
        let mut customers = self.customers.lock().unwrap();
        let customer = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RolodexError::NotFound(format!("customer {id}")))?;
        customer.status = CustomerStatus::Active;
        Ok(())
    }

    async fn reject_customer(&self, id: i64) -> Result<()> {
        self.delete_customer(id).await
    }

    async fn list_campaigns(&self, params: &PageParams) -> Result<Page<Campaign>> {
        self.list_gate(params).await?;

        let mut campaigns: Vec<Campaign> = self.campaigns.lock().unwrap().clone();
        let (field, descending) = sort_key(&params.sort);
        campaigns.sort_by(|a, b| {
            let ordering = match field.as_str() {
                "name" => a.name.cmp(&b.name),
                "status" => a.status.to_string().cmp(&b.status.to_string()),
                _ => a.created_at.cmp(&b.created_at),
            };
            if descending { ordering.reverse() } else { ordering }
        });

        Ok(paginate(campaigns, params))
    }

    async fn create_campaign(&self, draft: &CampaignDraft) -> Result<Campaign> {
        let mut campaigns = self.campaigns.lock().unwrap();
        let id = campaigns.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = Campaign {
            id,
            name: draft.name.clone(),
            subject: draft.subject.clone(),
            status: draft.status,
            recipients: None,
            open_rate: None,
            click_rate: None,
            created_at: Some("2024-06-01T12:00:00Z".to_string()),
            sent_at: None,
        };
        campaigns.push(created.clone());
        Ok(created)
    }

    async fn update_campaign(&self, id: i64, draft: &CampaignDraft) -> Result<Campaign> {
        let mut campaigns = self.campaigns.lock().unwrap();
        let campaign = campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RolodexError::NotFound(format!("campaign {id}")))?;
        campaign.name = draft.name.clone();
        campaign.subject = draft.subject.clone();
        campaign.status = draft.status;
        Ok(campaign.clone())
    }

    async fn delete_campaign(&self, id: i64) -> Result<()> {
        let mut campaigns = self.campaigns.lock().unwrap();
        let before = campaigns.len();
        campaigns.retain(|c| c.id != id);
        if campaigns.len() == before {
            return Err(RolodexError::NotFound(format!("campaign {id}")));
        }
        Ok(())
    }

    async fn pending_interactions(&self) -> Result<Vec<Interaction>> {
        Ok(self
            .interactions
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.status == InteractionStatus::Pending)
            .cloned()
            .collect())
    }

    async fn set_interaction_status(&self, id: i64, status: InteractionStatus) -> Result<()> {
        let mut interactions = self.interactions.lock().unwrap();
        let interaction = interactions
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| RolodexError::NotFound(format!("interaction {id}")))?;
        interaction.status = status;
        Ok(())
    }

    async fn get_settings(&self) -> Result<Settings> {
        Ok(Settings::default())
    }

    async fn update_settings(&self, _settings: &Settings) -> Result<()> {
        Ok(())
    }

    async fn analytics(&self) -> Result<AnalyticsSummary> {
        Ok(AnalyticsSummary {
            total_customers: self.customers.lock().unwrap().len() as u64,
            ..Default::default()
        })
    }

    async fn get_customer(&self, id: i64) -> Result<Customer> {
        self.customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| RolodexError::NotFound(format!("customer {id}")))
    }

    async fn update_profile(&self, id: i64, update: &CustomerUpdate) -> Result<Customer> {
        self.update_customer(id, update).await
    }

    async fn list_interactions(
        &self,
        _customer_id: i64,
        params: &PageParams,
    ) -> Result<Page<Interaction>> {
        self.list_gate(params).await?;

        let type_filter = params
            .filter
            .as_ref()
            .map(|(_, value)| value.clone())
            .unwrap_or_default();

        let mut interactions: Vec<Interaction> = self
            .interactions
            .lock()
            .unwrap()
            .iter()
            .filter(|i| type_filter.is_empty() || i.kind.to_string() == type_filter)
            .filter(|i| {
                params.search.is_empty()
                    || i.subject
                        .to_lowercase()
                        .contains(&params.search.to_lowercase())
            })
            .cloned()
            .collect();

        let (field, descending) = sort_key(&params.sort);
        interactions.sort_by(|a, b| {
            let ordering = match field.as_str() {
                "subject" => a.subject.cmp(&b.subject),
                "status" => a.status.to_string().cmp(&b.status.to_string()),
                _ => a.date.cmp(&b.date),
            };
            if descending { ordering.reverse() } else { ordering }
        });

        Ok(paginate(interactions, params))
    }

    async fn add_interaction(
        &self,
        _customer_id: i64,
        interaction: &NewInteraction,
    ) -> Result<Interaction> {
        let mut interactions = self.interactions.lock().unwrap();
        let id = interactions.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let created = Interaction {
            id,
            kind: interaction.kind,
            subject: interaction.subject.clone(),
            date: Some("2024-06-01T09:00:00Z".to_string()),
            status: InteractionStatus::Pending,
            notes: interaction.notes.clone(),
        };
        interactions.push(created.clone());
        Ok(created)
    }

    async fn my_campaigns(&self, _customer_id: i64) -> Result<Vec<Campaign>> {
        Ok(self.campaigns.lock().unwrap().clone())
    }

    async fn pending_customer_campaigns(&self) -> Result<Vec<CustomerCampaign>> {
        Ok(Vec::new())
    }

    async fn set_customer_campaign_status(
        &self,
        _id: i64,
        _status: CustomerCampaignStatus,
    ) -> Result<()> {
        Ok(())
    }

    async fn submit_campaign(
        &self,
        _customer_id: i64,
        draft: &CustomerCampaignDraft,
    ) -> Result<CustomerCampaign> {
        Ok(CustomerCampaign {
            id: 1,
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: CustomerCampaignStatus::Pending,
            customer: None,
        })
    }

    async fn my_submitted_campaigns(&self, _customer_id: i64) -> Result<Vec<CustomerCampaign>> {
        Ok(Vec::new())
    }

    async fn customer_analytics(&self, _customer_id: i64) -> Result<serde_json::Value> {
        Ok(serde_json::json!({}))
    }
}

// ============================================================================
// Console harness
// ============================================================================

/// Drives the console model against a [`MockApi`] with the same wiring the
/// view component uses: the reducer schedules work, the harness runs it in
/// spawned tasks, and completions flow back through the reducer.
pub struct Harness {
    pub state: Arc<Mutex<ConsoleState>>,
    pub api: Arc<MockApi>,
    pub debouncer: Debouncer,
}

impl Harness {
    pub fn new(role: Role, api: MockApi, debounce: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ConsoleState::new(
                role,
                1,
                "tester".to_string(),
                TEST_PAGE_SIZE,
            ))),
            api: Arc::new(api),
            debouncer: Debouncer::new(debounce),
        }
    }

    pub fn admin(api: MockApi) -> Self {
        Self::new(Role::Admin, api, Duration::from_millis(500))
    }

    pub fn snapshot(&self) -> ConsoleState {
        self.state.lock().unwrap().clone()
    }

    pub fn dispatch(&self, action: ConsoleAction) {
        let mut state = self.state.lock().unwrap();
        *state = reduce_console_state(state.clone(), action);
    }

    /// Start the fetch the reducer scheduled, if any. The returned task
    /// applies the result through the reducer when the mock responds.
    pub fn drain_fetch(&self) -> Option<tokio::task::JoinHandle<()>> {
        let (token, params, resource, role, user_id) = {
            let mut state = self.state.lock().unwrap();
            if !state.pending_fetch {
                return None;
            }
            let (token, params) = state.begin_fetch();
            (token, params, state.resource(), state.role, state.user_id)
        };

        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            let result = fetch_records(&api, role, user_id, resource, &params)
                .await
                .map_err(|e| FetchFailure::from_error(&e));
            let mut state = state.lock().unwrap();
            *state = reduce_console_state(
                state.clone(),
                ConsoleAction::FetchSettled { token, result },
            );
        }))
    }

    /// Run scheduled fetches to completion until the state settles
    pub async fn settle(&self) {
        while let Some(task) = self.drain_fetch() {
            task.await.unwrap();
        }
    }

    /// Simulate one search keystroke: record it, then race it through the
    /// debouncer like the view's search handler does.
    pub fn type_search(&self, value: &str) -> tokio::task::JoinHandle<()> {
        self.dispatch(ConsoleAction::SearchInput(value.to_string()));

        let resource = self.snapshot().resource();
        let debouncer = self.debouncer.clone();
        let state = Arc::clone(&self.state);
        let value = value.to_string();
        tokio::spawn(async move {
            if let Some(settled) = debouncer.settle(value).await {
                let mut state = state.lock().unwrap();
                *state = reduce_console_state(
                    state.clone(),
                    ConsoleAction::SearchSettled {
                        resource,
                        value: settled,
                    },
                );
            }
        })
    }

    /// Rows currently displayed, by their short label
    pub fn displayed_labels(&self) -> Vec<String> {
        self.snapshot()
            .page
            .items
            .iter()
            .map(|record| record.label())
            .collect()
    }
}

async fn fetch_records(
    api: &MockApi,
    role: Role,
    user_id: i64,
    resource: Resource,
    params: &PageParams,
) -> Result<PageResult<Record>> {
    let page = match resource {
        Resource::Customers => {
            let page = api.list_customers(params).await?;
            PageResult {
                items: page.content.into_iter().map(Record::Customer).collect(),
                total_pages: page.total_pages,
            }
        }
        Resource::Interactions => {
            let page = api.list_interactions(user_id, params).await?;
            PageResult {
                items: page.content.into_iter().map(Record::Interaction).collect(),
                total_pages: page.total_pages,
            }
        }
        Resource::Campaigns => {
            if role == Role::Customer {
                let campaigns = api.my_campaigns(user_id).await?;
                let total_pages = if campaigns.is_empty() { 0 } else { 1 };
                PageResult {
                    items: campaigns.into_iter().map(Record::Campaign).collect(),
                    total_pages,
                }
            } else {
                let page = api.list_campaigns(params).await?;
                PageResult {
                    items: page.content.into_iter().map(Record::Campaign).collect(),
                    total_pages: page.total_pages,
                }
            }
        }
    };
    Ok(page)
}
