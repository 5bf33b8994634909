//! Console model types for testable state management
//!
//! This module separates state (ConsoleState) from the view component,
//! enabling comprehensive unit testing without the iocraft framework. All
//! state transitions, including the stale-fetch suppression rules, are
//! pure functions over [`ConsoleState`].

use iocraft::prelude::{KeyCode, KeyModifiers};

use crate::api::types::{CampaignDraft, CustomerUpdate, NewCustomer, NewInteraction};
use crate::query::{FetchFailure, FetchSequencer, ListQuery, PageParams, PageResult};
use crate::resource::{Record, Resource};
use crate::session::Role;
use crate::tui::components::{EmptyStateKind, Shortcut, Toast};

use super::confirm::ConfirmState;
use super::forms::{FieldKind, FormState};

// ============================================================================
// State Types
// ============================================================================

/// A write the console wants performed against the backend.
///
/// Produced by form submission or delete confirmation; drained by the view,
/// which runs it asynchronously and reports back with `MutationDone` or
/// `MutationFailed`. Every completed mutation triggers a refetch of the
/// active list rather than a local patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRequest {
    CreateCustomer(NewCustomer),
    UpdateCustomer { id: i64, update: CustomerUpdate },
    DeleteCustomer { id: i64 },
    CreateInteraction(NewInteraction),
    CreateCampaign(CampaignDraft),
    UpdateCampaign { id: i64, draft: CampaignDraft },
    DeleteCampaign { id: i64 },
}

/// Raw state that changes during user interaction
#[derive(Debug, Clone)]
pub struct ConsoleState {
    // Identity
    pub role: Role,
    pub user_id: i64,
    pub username: String,

    // Tabs
    /// Tabs available to this role, in display order
    pub tabs: Vec<Resource>,
    /// Index into `tabs` of the active view
    pub active_tab: usize,

    // Query controller
    /// Query state of the active view
    pub query: ListQuery,
    /// Current page of rows, replaced wholesale by the latest fetch
    pub page: PageResult<Record>,
    /// Whether the latest fetch is still in flight
    pub loading: bool,
    /// Token source for stale-response suppression
    pub fetch_seq: FetchSequencer,
    /// Set when the view should start a new fetch
    pub pending_fetch: bool,

    // Row cursor
    pub selected_index: usize,

    // Search
    pub search_focused: bool,

    // Modals
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmState>,
    pub show_help: bool,
    pub show_error_modal: bool,
    /// Details of the most recent failure, for the error modal
    pub last_error: Option<FetchFailure>,
    pub toast: Option<Toast>,

    // Mutations
    /// Set when the view should run a write against the backend
    pub pending_mutation: Option<MutationRequest>,

    // App
    pub page_size: u32,
    pub should_exit: bool,
}

impl ConsoleState {
    pub fn new(role: Role, user_id: i64, username: String, page_size: u32) -> Self {
        let tabs = Resource::available_for(role);
        let query = default_query(tabs[0]);
        Self {
            role,
            user_id,
            username,
            tabs,
            active_tab: 0,
            query,
            page: PageResult::default(),
            loading: true,
            fetch_seq: FetchSequencer::new(),
            pending_fetch: true,
            selected_index: 0,
            search_focused: false,
            form: None,
            confirm: None,
            show_help: false,
            show_error_modal: false,
            last_error: None,
            toast: None,
            pending_mutation: None,
            page_size,
            should_exit: false,
        }
    }

    /// The active collection
    pub fn resource(&self) -> Resource {
        self.tabs[self.active_tab]
    }

    /// Derived request parameters for the active view
    pub fn params(&self) -> PageParams {
        self.query
            .params(self.page_size, self.resource().filter_key())
    }

    /// Start the fetch the reducer scheduled: supersede outstanding
    /// requests, raise the loading flag, and hand back the token the
    /// result must present.
    pub fn begin_fetch(&mut self) -> (u64, PageParams) {
        self.pending_fetch = false;
        self.loading = true;
        (self.fetch_seq.begin(), self.params())
    }

    /// Whether a non-default filter or search is narrowing the view
    pub fn is_narrowed(&self) -> bool {
        !self.query.search.is_empty()
            || self
                .query
                .filter
                .as_deref()
                .is_some_and(|f| f != crate::query::FILTER_ALL)
    }

    /// What the list area should show when there are no rows
    pub fn empty_state(&self) -> EmptyStateKind {
        if self.loading {
            EmptyStateKind::Loading
        } else if self.is_narrowed() {
            EmptyStateKind::NoMatches
        } else {
            EmptyStateKind::NoRows
        }
    }

    /// Whether records can be created on the active tab
    pub fn can_create(&self) -> bool {
        match self.resource() {
            Resource::Customers => true,
            Resource::Interactions => true,
            // The customer-facing campaigns tab is read-only
            Resource::Campaigns => self.role == Role::Admin,
        }
    }

    /// Whether the selected record can be edited or deleted
    pub fn can_modify(&self) -> bool {
        match self.resource() {
            Resource::Customers => true,
            Resource::Interactions => false,
            Resource::Campaigns => self.role == Role::Admin,
        }
    }

    fn selected_record(&self) -> Option<&Record> {
        self.page.items.get(self.selected_index)
    }
}

fn default_query(resource: Resource) -> ListQuery {
    let (field, dir) = resource.default_sort();
    let filter = resource.filter_key().map(|_| crate::query::FILTER_ALL);
    ListQuery::new(field, dir, filter)
}

// ============================================================================
// Action Types
// ============================================================================

/// All possible actions on the console
#[derive(Debug, Clone)]
pub enum ConsoleAction {
    // Navigation
    MoveUp,
    MoveDown,
    GoToTop,
    GoToBottom,
    /// Cycle to the next tab
    NextTab,
    /// Jump to a tab by index
    SwitchTab(usize),

    // Pagination
    NextPage,
    PrevPage,

    // Query intents
    /// Sort by the nth sortable column (1-based, as shown in the header)
    SortByColumn(usize),
    /// Advance the categorical filter to its next value
    CycleFilter,
    /// Raw search keystroke
    SearchInput(String),
    /// A search value survived the quiet period
    SearchSettled { resource: Resource, value: String },
    /// Explicit re-fetch of the active view
    Refresh,
    /// A fetch resolved; applied only when `token` is still current
    FetchSettled {
        token: u64,
        result: Result<PageResult<Record>, FetchFailure>,
    },

    // Search focus
    FocusSearch,
    ExitSearch,
    ClearSearchAndExit,

    // Forms
    OpenCreateForm,
    OpenEditForm,
    FormInput { field: usize, value: String },
    FormFocusNext,
    FormFocusPrev,
    FormCycleChoice,
    SubmitForm,
    CancelForm,

    // Delete flow
    RequestDelete,
    ConfirmYes,
    ConfirmNo,

    // Mutation results
    MutationDone { message: String },
    MutationFailed(FetchFailure),

    // Modals
    ShowHelp,
    HideHelp,
    ShowErrorModal,
    HideErrorModal,
    DismissToast,

    // App
    Quit,
}

// ============================================================================
// Reducer
// ============================================================================

/// Pure function: apply action to state (reducer pattern)
///
/// Contains only state transitions - no timers or network I/O. Actions that
/// need async work (fetches, mutations, debounce) set the `pending_*`
/// fields; the view drains them and reports completions back as actions.
pub fn reduce_console_state(mut state: ConsoleState, action: ConsoleAction) -> ConsoleState {
    let row_count = state.page.len();

    match action {
        // Navigation
        ConsoleAction::MoveUp => {
            state.selected_index = state.selected_index.saturating_sub(1);
        }
        ConsoleAction::MoveDown => {
            if row_count > 0 {
                state.selected_index = (state.selected_index + 1).min(row_count - 1);
            }
        }
        ConsoleAction::GoToTop => {
            state.selected_index = 0;
        }
        ConsoleAction::GoToBottom => {
            if row_count > 0 {
                state.selected_index = row_count - 1;
            }
        }
        ConsoleAction::NextTab => {
            let next = (state.active_tab + 1) % state.tabs.len();
            state = switch_tab(state, next);
        }
        ConsoleAction::SwitchTab(index) => {
            if index < state.tabs.len() && index != state.active_tab {
                state = switch_tab(state, index);
            }
        }

        // Pagination
        ConsoleAction::NextPage => {
            let before = state.query.page;
            state.query.next_page(state.page.total_pages);
            if state.query.page != before {
                state.selected_index = 0;
                state.pending_fetch = true;
            }
        }
        ConsoleAction::PrevPage => {
            let before = state.query.page;
            state.query.prev_page();
            if state.query.page != before {
                state.selected_index = 0;
                state.pending_fetch = true;
            }
        }

        // Query intents
        ConsoleAction::SortByColumn(digit) => {
            let fields = state.resource().sort_fields();
            if digit >= 1 && digit <= fields.len() {
                state.query.sort_by(fields[digit - 1]);
                state.selected_index = 0;
                state.pending_fetch = true;
            }
        }
        ConsoleAction::CycleFilter => {
            let options = state.resource().filter_options();
            if let Some(current) = state.query.filter.clone()
                && !options.is_empty()
            {
                let position = options
                    .iter()
                    .position(|option| *option == current)
                    .unwrap_or(0);
                let next = options[(position + 1) % options.len()];
                if state.query.set_filter(next) {
                    state.selected_index = 0;
                    state.pending_fetch = true;
                }
            }
        }
        ConsoleAction::SearchInput(value) => {
            if state.resource().supports_search() {
                state.query.set_search_input(&value);
            }
        }
        ConsoleAction::SearchSettled { resource, value } => {
            // A settled value for a tab the user has left is meaningless.
            if resource == state.resource() && state.query.settle_search(&value) {
                state.selected_index = 0;
                state.pending_fetch = true;
            }
        }
        ConsoleAction::Refresh => {
            state.pending_fetch = true;
        }
        ConsoleAction::FetchSettled { token, result } => {
            if !state.fetch_seq.is_current(token) {
                // Superseded request: its result must not touch the page,
                // the error surface, or the loading flag.
                return state;
            }

            state.loading = false;
            match result {
                Ok(page) => {
                    state.last_error = None;
                    if state.selected_index >= page.len() {
                        state.selected_index = page.len().saturating_sub(1);
                    }
                    // A shrunken collection can leave the cursor past the
                    // end (e.g. the last row of the last page was deleted).
                    if page.total_pages > 0 && state.query.page >= page.total_pages {
                        state
                            .query
                            .set_page(page.total_pages - 1, Some(page.total_pages));
                        state.pending_fetch = true;
                    }
                    state.page = page;
                }
                Err(failure) => {
                    state.toast = Some(Toast::error(format!(
                        "Failed to load {}: {}",
                        state.resource().title().to_lowercase(),
                        failure.message
                    )));
                    state.last_error = Some(failure);
                }
            }
        }

        // Search focus
        ConsoleAction::FocusSearch => {
            if state.resource().supports_search() {
                state.search_focused = true;
            }
        }
        ConsoleAction::ExitSearch => {
            state.search_focused = false;
        }
        ConsoleAction::ClearSearchAndExit => {
            state.search_focused = false;
            state.query.set_search_input("");
            if state.query.settle_search("") {
                state.selected_index = 0;
                state.pending_fetch = true;
            }
        }

        // Forms
        ConsoleAction::OpenCreateForm => {
            if state.can_create() {
                state.form = Some(match state.resource() {
                    Resource::Customers => FormState::create_customer(),
                    Resource::Interactions => FormState::create_interaction(),
                    Resource::Campaigns => FormState::create_campaign(),
                });
            }
        }
        ConsoleAction::OpenEditForm => {
            if state.can_modify() {
                state.form = match state.selected_record() {
                    Some(Record::Customer(customer)) => Some(FormState::edit_customer(customer)),
                    Some(Record::Campaign(campaign)) => Some(FormState::edit_campaign(campaign)),
                    _ => None,
                };
            }
        }
        ConsoleAction::FormInput { field, value } => {
            if let Some(form) = &mut state.form {
                form.set_value(field, value);
            }
        }
        ConsoleAction::FormFocusNext => {
            if let Some(form) = &mut state.form {
                form.focus_next();
            }
        }
        ConsoleAction::FormFocusPrev => {
            if let Some(form) = &mut state.form {
                form.focus_prev();
            }
        }
        ConsoleAction::FormCycleChoice => {
            if let Some(form) = &mut state.form {
                form.cycle_choice();
            }
        }
        ConsoleAction::SubmitForm => {
            if let Some(form) = &state.form {
                match form.submit() {
                    Ok(request) => {
                        state.pending_mutation = Some(request);
                        state.form = None;
                    }
                    Err(message) => {
                        if let Some(form) = &mut state.form {
                            form.error = Some(message);
                        }
                    }
                }
            }
        }
        ConsoleAction::CancelForm => {
            state.form = None;
        }

        // Delete flow
        ConsoleAction::RequestDelete => {
            let record = state.selected_record().cloned();
            if state.can_modify()
                && let Some(record) = record
            {
                let request = match &record {
                    Record::Customer(customer) => Some(MutationRequest::DeleteCustomer {
                        id: customer.id,
                    }),
                    Record::Campaign(campaign) => Some(MutationRequest::DeleteCampaign {
                        id: campaign.id,
                    }),
                    Record::Interaction(_) => None,
                };
                if let Some(request) = request {
                    state.confirm = Some(ConfirmState::delete(&record.label(), request));
                }
            }
        }
        ConsoleAction::ConfirmYes => {
            if let Some(confirm) = state.confirm.take() {
                state.pending_mutation = Some(confirm.request);
            }
        }
        ConsoleAction::ConfirmNo => {
            state.confirm = None;
        }

        // Mutation results
        ConsoleAction::MutationDone { message } => {
            state.toast = Some(Toast::info(message));
            state.pending_fetch = true;
        }
        ConsoleAction::MutationFailed(failure) => {
            state.toast = Some(Toast::error(failure.message.clone()));
            state.last_error = Some(failure);
        }

        // Modals
        ConsoleAction::ShowHelp => {
            state.show_help = true;
        }
        ConsoleAction::HideHelp => {
            state.show_help = false;
        }
        ConsoleAction::ShowErrorModal => {
            if state.last_error.is_some() {
                state.show_error_modal = true;
            }
        }
        ConsoleAction::HideErrorModal => {
            state.show_error_modal = false;
        }
        ConsoleAction::DismissToast => {
            state.toast = None;
        }

        // App
        ConsoleAction::Quit => {
            state.should_exit = true;
        }
    }

    state
}

/// Switch tabs: the new view starts from its default query and refetches.
/// Query state is not shared across views.
fn switch_tab(mut state: ConsoleState, index: usize) -> ConsoleState {
    state.active_tab = index;
    state.query = default_query(state.resource());
    state.page = PageResult::default();
    state.selected_index = 0;
    state.search_focused = false;
    state.pending_fetch = true;
    state
}

// ============================================================================
// Key Mapping
// ============================================================================

/// Convert a key event to a ConsoleAction (pure function)
///
/// Takes the full state to check modal states for context-sensitive key
/// handling. Returns `None` if the key doesn't map to any action.
pub fn key_to_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    state: &ConsoleState,
) -> Option<ConsoleAction> {
    // Modal states capture all input, most specific first.

    if state.show_help {
        return match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(ConsoleAction::HideHelp),
            _ => None,
        };
    }

    if state.show_error_modal {
        return match code {
            KeyCode::Esc => Some(ConsoleAction::HideErrorModal),
            _ => None,
        };
    }

    if state.confirm.is_some() {
        return match code {
            KeyCode::Char('y') | KeyCode::Enter => Some(ConsoleAction::ConfirmYes),
            KeyCode::Char('n') | KeyCode::Esc => Some(ConsoleAction::ConfirmNo),
            _ => None,
        };
    }

    if let Some(form) = &state.form {
        let on_choice = matches!(
            form.fields.get(form.focused).map(|f| f.kind),
            Some(FieldKind::Choice(_))
        );
        return match code {
            KeyCode::Esc => Some(ConsoleAction::CancelForm),
            KeyCode::Enter => Some(ConsoleAction::SubmitForm),
            KeyCode::Tab => Some(ConsoleAction::FormFocusNext),
            KeyCode::BackTab => Some(ConsoleAction::FormFocusPrev),
            KeyCode::Char(' ') if on_choice => Some(ConsoleAction::FormCycleChoice),
            KeyCode::Down if on_choice => Some(ConsoleAction::FormCycleChoice),
            // Everything else belongs to the focused text input
            _ => None,
        };
    }

    if state.search_focused {
        return match (code, modifiers) {
            (KeyCode::Esc, _) => Some(ConsoleAction::ClearSearchAndExit),
            (KeyCode::Enter, _) => Some(ConsoleAction::ExitSearch),
            (KeyCode::Char('q'), m) if m.contains(KeyModifiers::CONTROL) => {
                Some(ConsoleAction::Quit)
            }
            _ => None,
        };
    }

    normal_key_to_action(code, state)
}

/// Convert a key event in normal mode to a ConsoleAction
fn normal_key_to_action(code: KeyCode, state: &ConsoleState) -> Option<ConsoleAction> {
    match code {
        // Navigation
        KeyCode::Char('j') | KeyCode::Down => Some(ConsoleAction::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(ConsoleAction::MoveUp),
        KeyCode::Char('g') => Some(ConsoleAction::GoToTop),
        KeyCode::Char('G') => Some(ConsoleAction::GoToBottom),
        KeyCode::Tab => Some(ConsoleAction::NextTab),

        // Pagination
        KeyCode::Char('n') => Some(ConsoleAction::NextPage),
        KeyCode::Char('p') => Some(ConsoleAction::PrevPage),

        // Sorting: digits as shown in the column headers
        KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
            Some(ConsoleAction::SortByColumn(c as usize - '0' as usize))
        }

        // Filter / search
        KeyCode::Char('f') => Some(ConsoleAction::CycleFilter),
        KeyCode::Char('/') => Some(ConsoleAction::FocusSearch),

        // Operations
        KeyCode::Char('r') => Some(ConsoleAction::Refresh),
        KeyCode::Char('a') => Some(ConsoleAction::OpenCreateForm),
        KeyCode::Char('e') | KeyCode::Enter => Some(ConsoleAction::OpenEditForm),
        KeyCode::Char('d') => Some(ConsoleAction::RequestDelete),
        KeyCode::Char('x') => Some(ConsoleAction::ShowErrorModal),

        // Modals
        KeyCode::Char('?') => Some(ConsoleAction::ShowHelp),

        // App
        KeyCode::Char('q') => Some(ConsoleAction::Quit),
        KeyCode::Esc => {
            if state.toast.is_some() {
                Some(ConsoleAction::DismissToast)
            } else {
                Some(ConsoleAction::Quit)
            }
        }

        _ => None,
    }
}

// ============================================================================
// Shortcuts
// ============================================================================

/// Compute the footer shortcuts for the current state
pub fn compute_shortcuts(state: &ConsoleState) -> Vec<Shortcut> {
    if state.show_help || state.show_error_modal {
        return vec![Shortcut::new("Esc", "close")];
    }
    if state.confirm.is_some() {
        return vec![
            Shortcut::new("y", "yes"),
            Shortcut::new("n", "no"),
        ];
    }
    if let Some(form) = &state.form {
        let mut shortcuts = vec![
            Shortcut::new("Tab", "next field"),
            Shortcut::new("Enter", "save"),
            Shortcut::new("Esc", "cancel"),
        ];
        if form
            .fields
            .iter()
            .any(|field| matches!(field.kind, FieldKind::Choice(_)))
        {
            shortcuts.insert(1, Shortcut::new("Space", "change option"));
        }
        return shortcuts;
    }
    if state.search_focused {
        return vec![
            Shortcut::new("Enter", "apply"),
            Shortcut::new("Esc", "clear & exit"),
            Shortcut::new("C-q", "quit"),
        ];
    }

    let resource = state.resource();
    let mut shortcuts = vec![
        Shortcut::new("q", "quit"),
        Shortcut::new("Tab", "switch view"),
        Shortcut::new("j/k", "nav"),
        Shortcut::new("n/p", "page"),
        Shortcut::new(
            format!("1-{}", resource.sort_fields().len()),
            "sort",
        ),
    ];
    if resource.supports_search() {
        shortcuts.push(Shortcut::new("/", "search"));
    }
    if resource.filter_key().is_some() {
        shortcuts.push(Shortcut::new("f", "filter"));
    }
    if state.can_create() {
        shortcuts.push(Shortcut::new("a", "add"));
    }
    if state.can_modify() {
        shortcuts.push(Shortcut::new("e", "edit"));
        shortcuts.push(Shortcut::new("d", "delete"));
    }
    shortcuts.push(Shortcut::new("r", "refresh"));
    shortcuts.push(Shortcut::new("?", "help"));
    shortcuts
}

// ============================================================================
// Tests
// ============================================================================
