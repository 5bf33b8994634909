//! Main console view component
//!
//! Wires the pure console model to iocraft: terminal events become
//! [`ConsoleAction`]s, scheduled fetches and mutations become async
//! handlers, and the state snapshot renders into the component tree.

// Allow clone on Copy types - used intentionally in async closures for clarity
#![allow(clippy::clone_on_copy)]
#![allow(clippy::redundant_closure)]

use std::time::Duration;

use iocraft::prelude::*;

use crate::api::types::Page;
use crate::api::{CrmApi, HttpApi};
use crate::config::{Config, SEARCH_DEBOUNCE_MS};
use crate::error::Result;
use crate::query::{Debouncer, FetchFailure, PageParams, PageResult};
use crate::resource::{Record, Resource};
use crate::session::{Role, Session};
use crate::tui::components::{
    ConsoleHeader, EmptyState, Footer, Modal, ModalTone, PaginationBar, RecordTable, SearchBar,
    render_toast,
};
use crate::tui::theme::theme;

use super::forms::FieldKind;
use super::model::{
    ConsoleAction, ConsoleState, MutationRequest, compute_shortcuts, key_to_action,
    reduce_console_state,
};

/// Fetch one page of the given resource as display records
async fn fetch_page(
    api: &HttpApi,
    role: Role,
    user_id: i64,
    resource: Resource,
    params: &PageParams,
) -> Result<PageResult<Record>> {
    let page = match resource {
        Resource::Customers => {
            let page = api.list_customers(params).await?;
            PageResult::from(Page {
                content: page.content.into_iter().map(Record::Customer).collect(),
                total_pages: page.total_pages,
            })
        }
        Resource::Interactions => {
            let page = api.list_interactions(user_id, params).await?;
            PageResult::from(Page {
                content: page.content.into_iter().map(Record::Interaction).collect(),
                total_pages: page.total_pages,
            })
        }
        Resource::Campaigns => {
            if role == Role::Customer {
                // The customer's campaign list is a plain, unpaginated
                // collection; present it as a single page.
                let campaigns = api.my_campaigns(user_id).await?;
                let total_pages = if campaigns.is_empty() { 0 } else { 1 };
                PageResult {
                    items: campaigns.into_iter().map(Record::Campaign).collect(),
                    total_pages,
                }
            } else {
                let page = api.list_campaigns(params).await?;
                PageResult::from(Page {
                    content: page.content.into_iter().map(Record::Campaign).collect(),
                    total_pages: page.total_pages,
                })
            }
        }
    };
    Ok(page)
}

/// Run one queued mutation, returning the success toast message
async fn run_mutation(api: &HttpApi, user_id: i64, request: MutationRequest) -> Result<String> {
    Ok(match request {
        MutationRequest::CreateCustomer(draft) => {
            api.create_customer(&draft).await?;
            "Customer added successfully.".to_string()
        }
        MutationRequest::UpdateCustomer { id, update } => {
            api.update_customer(id, &update).await?;
            "Customer details have been updated.".to_string()
        }
        MutationRequest::DeleteCustomer { id } => {
            api.delete_customer(id).await?;
            "The customer has been deleted.".to_string()
        }
        MutationRequest::CreateInteraction(draft) => {
            api.add_interaction(user_id, &draft).await?;
            "Interaction added successfully.".to_string()
        }
        MutationRequest::CreateCampaign(draft) => {
            api.create_campaign(&draft).await?;
            "Campaign created as a draft.".to_string()
        }
        MutationRequest::UpdateCampaign { id, draft } => {
            api.update_campaign(id, &draft).await?;
            "Campaign has been updated.".to_string()
        }
        MutationRequest::DeleteCampaign { id } => {
            api.delete_campaign(id).await?;
            "The campaign has been deleted.".to_string()
        }
    })
}

/// Props for the Console component
#[derive(Default, Props)]
pub struct ConsoleProps {
    pub config: Option<Config>,
    pub session: Option<Session>,
}

/// Main console component
#[component]
pub fn Console<'a>(props: &ConsoleProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();

    let theme = theme();

    let config = props.config.clone().unwrap_or_default();
    let session = props.session.clone();

    let state: State<ConsoleState> = hooks.use_state({
        let session = session.clone();
        let page_size = config.page_size;
        move || match &session {
            Some(session) => ConsoleState::new(
                session.role,
                session.user_id,
                session.username.clone(),
                page_size,
            ),
            // Unreachable from the CLI, which requires a session first;
            // keep a sane fallback for embedding.
            None => ConsoleState::new(Role::Customer, 0, String::new(), page_size),
        }
    });

    let api: State<Option<HttpApi>> = hooks.use_state({
        let config = config.clone();
        let session = session.clone();
        move || HttpApi::new(&config, session.as_ref()).ok()
    });

    let debouncer: State<Debouncer> =
        hooks.use_state(|| Debouncer::new(Duration::from_millis(SEARCH_DEBOUNCE_MS)));

    // Async fetch handler: runs the request and reports back through the
    // reducer, which enforces last-request-wins.
    let fetch_handler: Handler<(u64, Resource, PageParams)> = hooks.use_async_handler({
        let state = state.clone();
        let api = api.clone();

        move |(token, resource, params): (u64, Resource, PageParams)| {
            let mut state = state.clone();
            let api = api.clone();

            async move {
                let client = api.read().clone();
                let (role, user_id) = {
                    let snapshot = state.read();
                    (snapshot.role, snapshot.user_id)
                };

                let result = match client {
                    Some(client) => fetch_page(&client, role, user_id, resource, &params)
                        .await
                        .map_err(|e| FetchFailure::from_error(&e)),
                    None => Err(FetchFailure::new("Config Error", "no API client available")),
                };

                let next = reduce_console_state(
                    state.read().clone(),
                    ConsoleAction::FetchSettled { token, result },
                );
                state.set(next);
            }
        }
    });

    // Async search handler: record the keystroke, then let it sit out the
    // quiet period. Only the value that survives reaches the query state.
    let search_handler: Handler<String> = hooks.use_async_handler({
        let state = state.clone();
        let debouncer = debouncer.clone();

        move |value: String| {
            let mut state = state.clone();
            let debouncer = debouncer.read().clone();

            async move {
                let next = reduce_console_state(
                    state.read().clone(),
                    ConsoleAction::SearchInput(value.clone()),
                );
                state.set(next);

                let resource = state.read().resource();
                if let Some(settled) = debouncer.settle(value).await {
                    let next = reduce_console_state(
                        state.read().clone(),
                        ConsoleAction::SearchSettled {
                            resource,
                            value: settled,
                        },
                    );
                    state.set(next);
                }
            }
        }
    });

    // Async mutation handler: every completed write triggers a refetch via
    // MutationDone rather than patching the page locally.
    let mutation_handler: Handler<MutationRequest> = hooks.use_async_handler({
        let state = state.clone();
        let api = api.clone();

        move |request: MutationRequest| {
            let mut state = state.clone();
            let api = api.clone();

            async move {
                let client = api.read().clone();
                let user_id = state.read().user_id;

                let action = match client {
                    Some(client) => match run_mutation(&client, user_id, request).await {
                        Ok(message) => ConsoleAction::MutationDone { message },
                        Err(e) => ConsoleAction::MutationFailed(FetchFailure::from_error(&e)),
                    },
                    None => ConsoleAction::MutationFailed(FetchFailure::new(
                        "Config Error",
                        "no API client available",
                    )),
                };

                let next = reduce_console_state(state.read().clone(), action);
                state.set(next);
            }
        }
    });

    // Drain scheduled work. The reducer only flags it; starting the actual
    // async operation happens here, once per render pass.
    {
        let mut state = state.clone();
        if state.read().pending_fetch {
            let (token, params, resource) = {
                let mut snapshot = state.read().clone();
                let (token, params) = snapshot.begin_fetch();
                let resource = snapshot.resource();
                state.set(snapshot);
                (token, params, resource)
            };
            fetch_handler.clone()((token, resource, params));
        }

        if state.read().pending_mutation.is_some() {
            let request = {
                let mut snapshot = state.read().clone();
                let request = snapshot.pending_mutation.take();
                state.set(snapshot);
                request
            };
            if let Some(request) = request {
                mutation_handler.clone()(request);
            }
        }
    }

    // Keyboard events
    hooks.use_terminal_events({
        let state = state.clone();
        move |event| {
            if let TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
                && kind != KeyEventKind::Release
            {
                let mut state = state.clone();
                let current = state.read().clone();
                if let Some(action) = key_to_action(code, modifiers, &current) {
                    let next = reduce_console_state(state.read().clone(), action);
                    state.set(next);
                }
            }
        }
    });

    let snapshot = state.read().clone();

    if snapshot.should_exit {
        system.exit();
    }

    let resource = snapshot.resource();
    let identity = format!("{} ({})", snapshot.username, snapshot.role);
    let shortcuts = compute_shortcuts(&snapshot);

    // Leave room for header, search bar, table header, pagination, footer.
    let list_height = height.saturating_sub(6) as usize;
    let visible_rows: Vec<Record> = snapshot
        .page
        .items
        .iter()
        .take(list_height.max(1))
        .cloned()
        .collect();

    let filter_label = snapshot
        .query
        .filter
        .as_deref()
        .filter(|f| *f != crate::query::FILTER_ALL)
        .map(|f| format!("type: {f}"));

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            ConsoleHeader(
                tabs: snapshot.tabs.clone(),
                active: Some(resource),
                identity: identity,
                filtered: snapshot.is_narrowed(),
            )

            // Search / status row
            View(
                width: 100pct,
                height: 1,
                flex_direction: FlexDirection::Row,
            ) {
                #(if resource.supports_search() {
                    Some(element! {
                        View(flex_grow: 1.0) {
                            SearchBar(
                                value: snapshot.query.search_input.clone(),
                                has_focus: snapshot.search_focused,
                                on_change: Some(search_handler.clone()),
                            )
                        }
                    })
                } else {
                    None
                })

                #(filter_label.as_ref().map(|label| {
                    let label = label.clone();
                    element! {
                        View(padding_right: 1) {
                            Text(content: label, color: theme.sort_indicator)
                        }
                    }
                }))

                #(if snapshot.loading {
                    Some(element! {
                        View(padding_right: 1) {
                            Text(content: "loading...", color: theme.text_dimmed)
                        }
                    })
                } else {
                    None
                })
            }

            // Main list area
            #(if visible_rows.is_empty() {
                element! {
                    EmptyState(
                        kind: snapshot.empty_state(),
                        what: resource.title().to_lowercase(),
                    )
                }
                .into_any()
            } else {
                element! {
                    RecordTable(
                        resource: Some(resource),
                        rows: visible_rows.clone(),
                        selected_index: snapshot.selected_index,
                        sort_field: snapshot.query.sort_field.clone(),
                        sort_dir: Some(snapshot.query.sort_dir),
                    )
                }
                .into_any()
            })

            PaginationBar(
                page: snapshot.query.page,
                total_pages: snapshot.page.total_pages,
            )

            Footer(shortcuts: shortcuts)

            // Toast notification
            #(render_toast(&snapshot.toast))

            // Form modal
            #(snapshot.form.as_ref().map(|form| {
                render_form_modal(form, state.clone())
            }))

            // Confirm dialog
            #(snapshot.confirm.as_ref().map(|confirm| {
                let title = confirm.title.clone();
                let message = confirm.message.clone();
                element! {
                    Modal(
                        title: title,
                        hints: "y: yes | n: no".to_string(),
                        tone: Some(ModalTone::Warning),
                        width: Some(56u32),
                    ) {
                        Text(content: message)
                    }
                }
                .into_any()
            }))

            // Error detail modal
            #(if snapshot.show_error_modal {
                snapshot.last_error.as_ref().map(|failure| {
                    let title = failure.title.clone();
                    let message = failure.message.clone();
                    element! {
                        Modal(
                            title: title,
                            hints: "Esc: close".to_string(),
                            tone: Some(ModalTone::Error),
                            width: Some(70u32),
                        ) {
                            Text(content: message)
                        }
                    }
                    .into_any()
                })
            } else {
                None
            })

            // Help modal
            #(if snapshot.show_help {
                Some(render_help_modal())
            } else {
                None
            })
        }
    }
}

/// Render the open form as a modal with one input row per field
fn render_form_modal(
    form: &super::forms::FormState,
    state: State<ConsoleState>,
) -> AnyElement<'static> {
    let theme = theme();
    let title = form.title.clone();
    let error = form.error.clone();

    let field_rows: Vec<AnyElement<'static>> = form
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = index == form.focused;
            let label = format!("{:>10}: ", field.label);

            let input: AnyElement<'static> = match &field.kind {
                FieldKind::Choice(_) => {
                    let content = format!("< {} >", field.value);
                    element! {
                        Text(
                            content: content,
                            color: if focused { theme.sort_indicator } else { theme.text },
                        )
                    }
                    .into_any()
                }
                FieldKind::Secret if !focused => {
                    let masked = "*".repeat(field.value.chars().count());
                    element! {
                        Text(content: masked, color: theme.text)
                    }
                    .into_any()
                }
                _ => {
                    let value = field.value.clone();
                    let state = state.clone();
                    element! {
                        TextInput(
                            value: value,
                            has_focus: focused,
                            on_change: move |new_value: String| {
                                let mut state = state.clone();
                                let next = reduce_console_state(
                                    state.read().clone(),
                                    ConsoleAction::FormInput {
                                        field: index,
                                        value: new_value,
                                    },
                                );
                                state.set(next);
                            },
                            color: theme.text,
                        )
                    }
                    .into_any()
                }
            };

            element! {
                View(
                    width: 100pct,
                    height: 1,
                    flex_direction: FlexDirection::Row,
                ) {
                    Text(
                        content: label,
                        color: if focused { theme.border_focused } else { theme.text_dimmed },
                    )
                    View(flex_grow: 1.0) {
                        #(input)
                    }
                }
            }
            .into_any()
        })
        .collect();

    element! {
        Modal(
            title: title,
            hints: "Tab: next field | Enter: save | Esc: cancel".to_string(),
            width: Some(60u32),
        ) {
            #(field_rows)

            #(error.map(|message| {
                element! {
                    View(width: 100pct, padding_top: 1) {
                        Text(content: message, color: theme.error)
                    }
                }
            }))
        }
    }
    .into_any()
}

/// Render the help modal
fn render_help_modal() -> AnyElement<'static> {
    let theme = theme();

    let entries = [
        ("j/k or arrows", "move the row cursor"),
        ("g / G", "jump to first / last row"),
        ("Tab", "switch between views"),
        ("n / p", "next / previous page"),
        ("1-9", "sort by the numbered column; again to flip"),
        ("/", "search (applies after you stop typing)"),
        ("f", "cycle the type filter"),
        ("a / e / d", "add / edit / delete the selected record"),
        ("r", "refresh the current view"),
        ("x", "show details of the last error"),
        ("q", "quit"),
    ];

    let rows: Vec<AnyElement<'static>> = entries
        .iter()
        .map(|(key, action)| {
            element! {
                View(width: 100pct, flex_direction: FlexDirection::Row) {
                    View(width: 16) {
                        Text(content: key.to_string(), color: theme.highlight, weight: Weight::Bold)
                    }
                    Text(content: action.to_string(), color: theme.text)
                }
            }
            .into_any()
        })
        .collect();

    element! {
        Modal(
            title: "Help".to_string(),
            hints: "Esc: close".to_string(),
            width: Some(64u32),
        ) {
            #(rows)
        }
    }
    .into_any()
}
