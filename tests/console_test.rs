//! Console scenarios: sorting, pagination, tab behavior, and the
//! create/edit/delete flows with their refetch-after-mutation contract.

mod common;

use std::time::Duration;

use common::{Harness, MockApi, make_campaign};
use rolodex::query::SortDirection;
use rolodex::resource::Resource;
use rolodex::session::Role;
use rolodex::tui::console::{ConsoleAction, MutationRequest};

#[tokio::test(start_paused = true)]
async fn sort_column_reselect_toggles_direction() {
    let harness = Harness::admin(MockApi::with_customers(5));
    harness.settle().await;

    // Column 1 is username, already the ascending sort; reselecting flips.
    harness.dispatch(ConsoleAction::SortByColumn(1));
    harness.settle().await;
    let state = harness.snapshot();
    assert_eq!(state.query.sort_dir, SortDirection::Desc);
    assert_eq!(harness.displayed_labels()[0], "user04");

    harness.dispatch(ConsoleAction::SortByColumn(1));
    harness.settle().await;
    let state = harness.snapshot();
    assert_eq!(state.query.sort_dir, SortDirection::Asc);
    assert_eq!(harness.displayed_labels()[0], "user00");
}

#[tokio::test(start_paused = true)]
async fn sort_request_lands_on_the_wire_as_composite_param() {
    let harness = Harness::admin(MockApi::with_customers(5));
    harness.settle().await;

    harness.dispatch(ConsoleAction::SortByColumn(2));
    harness.settle().await;

    let calls = harness.api.recorded_calls();
    assert_eq!(calls.last().unwrap().sort, "email,asc");
}

#[tokio::test(start_paused = true)]
async fn pagination_walks_pages_and_stops_at_the_edges() {
    // 25 customers at page size 10 -> 3 pages, last one short.
    let harness = Harness::admin(MockApi::with_customers(25));
    harness.settle().await;
    assert_eq!(harness.snapshot().page.total_pages, 3);
    assert_eq!(harness.displayed_labels().len(), 10);

    harness.dispatch(ConsoleAction::NextPage);
    harness.settle().await;
    harness.dispatch(ConsoleAction::NextPage);
    harness.settle().await;

    let state = harness.snapshot();
    assert_eq!(state.query.page, 2);
    assert_eq!(state.page.len(), 5);

    // Page 2 of 3 is the last; another next must not fetch.
    let calls_before = harness.api.recorded_calls().len();
    harness.dispatch(ConsoleAction::NextPage);
    harness.settle().await;
    assert_eq!(harness.snapshot().query.page, 2);
    assert_eq!(harness.api.recorded_calls().len(), calls_before);
}

#[tokio::test(start_paused = true)]
async fn switching_tabs_does_not_leak_query_state() {
    let api = MockApi::with_customers(15);
    *api.campaigns.lock().unwrap() = vec![make_campaign(1, "Spring"), make_campaign(2, "Fall")];

    let harness = Harness::admin(api);
    harness.settle().await;

    let task = harness.type_search("user01");
    task.await.unwrap();
    harness.settle().await;
    assert_eq!(harness.displayed_labels(), vec!["user01"]);

    harness.dispatch(ConsoleAction::NextTab);
    harness.settle().await;

    let state = harness.snapshot();
    assert_eq!(state.resource(), Resource::Campaigns);
    assert!(state.query.search.is_empty());
    assert_eq!(state.query.sort_field, "createdAt");
    assert_eq!(harness.displayed_labels().len(), 2);

    // The campaigns request carried campaign defaults, not leftovers from
    // the customers tab.
    let calls = harness.api.recorded_calls();
    let last = calls.last().unwrap();
    assert_eq!(last.sort, "createdAt,desc");
    assert_eq!(last.search, "");
}

#[tokio::test(start_paused = true)]
async fn interactions_filter_param_is_empty_for_all() {
    let harness = Harness::new(
        Role::Customer,
        MockApi::default(),
        Duration::from_millis(500),
    );
    harness.settle().await;

    let calls = harness.api.recorded_calls();
    let first = calls.first().unwrap();
    // "all" goes on the wire as an empty value, not an omitted key.
    assert_eq!(
        first.filter,
        Some(("type".to_string(), "".to_string()))
    );
}

#[tokio::test(start_paused = true)]
async fn create_customer_flow_refetches_list() {
    let harness = Harness::admin(MockApi::with_customers(2));
    harness.settle().await;
    assert_eq!(harness.displayed_labels().len(), 2);

    harness.dispatch(ConsoleAction::OpenCreateForm);
    harness.dispatch(ConsoleAction::FormInput {
        field: 0,
        value: "zara".to_string(),
    });
    harness.dispatch(ConsoleAction::FormInput {
        field: 1,
        value: "zara@example.com".to_string(),
    });
    harness.dispatch(ConsoleAction::FormInput {
        field: 2,
        value: "hunter2".to_string(),
    });
    harness.dispatch(ConsoleAction::SubmitForm);

    // Run the queued mutation the way the view does, then the refetch.
    let request = {
        let mut state = harness.state.lock().unwrap();
        state.pending_mutation.take().unwrap()
    };
    assert!(matches!(request, MutationRequest::CreateCustomer(_)));
    let message = run_mutation(&harness, request).await;
    harness.dispatch(ConsoleAction::MutationDone { message });
    harness.settle().await;

    let labels = harness.displayed_labels();
    assert!(labels.contains(&"zara".to_string()));
    assert_eq!(labels.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn duplicate_username_surfaces_server_message() {
    let harness = Harness::admin(MockApi::with_customers(2));
    harness.settle().await;

    harness.dispatch(ConsoleAction::OpenCreateForm);
    harness.dispatch(ConsoleAction::FormInput {
        field: 0,
        value: "user00".to_string(),
    });
    harness.dispatch(ConsoleAction::FormInput {
        field: 1,
        value: "dup@example.com".to_string(),
    });
    harness.dispatch(ConsoleAction::FormInput {
        field: 2,
        value: "hunter2".to_string(),
    });
    harness.dispatch(ConsoleAction::SubmitForm);

    let request = {
        let mut state = harness.state.lock().unwrap();
        state.pending_mutation.take().unwrap()
    };
    let failure = run_mutation_err(&harness, request).await;
    harness.dispatch(ConsoleAction::MutationFailed(failure));

    let state = harness.snapshot();
    assert!(
        state
            .toast
            .as_ref()
            .unwrap()
            .message
            .contains("Username already taken")
    );
    // No refetch was scheduled for a failed write.
    assert!(!state.pending_fetch);
}

#[tokio::test(start_paused = true)]
async fn deleting_last_row_of_last_page_steps_back_a_page() {
    // 11 customers -> 2 pages, the second with a single row.
    let harness = Harness::admin(MockApi::with_customers(11));
    harness.settle().await;

    harness.dispatch(ConsoleAction::NextPage);
    harness.settle().await;
    assert_eq!(harness.displayed_labels(), vec!["user10"]);

    harness.dispatch(ConsoleAction::RequestDelete);
    harness.dispatch(ConsoleAction::ConfirmYes);
    let request = {
        let mut state = harness.state.lock().unwrap();
        state.pending_mutation.take().unwrap()
    };
    assert_eq!(request, MutationRequest::DeleteCustomer { id: 10 });
    let message = run_mutation(&harness, request).await;
    harness.dispatch(ConsoleAction::MutationDone { message });
    harness.settle().await;

    // The refetch found page 1 gone and clamped back to page 0.
    let state = harness.snapshot();
    assert_eq!(state.query.page, 0);
    assert_eq!(state.page.total_pages, 1);
    assert_eq!(state.page.len(), 10);
}

#[tokio::test(start_paused = true)]
async fn customer_campaigns_tab_is_single_page_read_only() {
    let api = MockApi::default();
    *api.campaigns.lock().unwrap() = vec![make_campaign(1, "Spring")];

    let harness = Harness::new(Role::Customer, api, Duration::from_millis(500));
    harness.settle().await;

    harness.dispatch(ConsoleAction::NextTab);
    harness.settle().await;

    let state = harness.snapshot();
    assert_eq!(state.resource(), Resource::Campaigns);
    assert_eq!(state.page.total_pages, 1);
    assert_eq!(harness.displayed_labels(), vec!["Spring"]);

    harness.dispatch(ConsoleAction::OpenCreateForm);
    assert!(harness.snapshot().form.is_none());
    harness.dispatch(ConsoleAction::RequestDelete);
    assert!(harness.snapshot().confirm.is_none());
}

// Minimal mutation runners mirroring the view's handler.

async fn run_mutation(harness: &Harness, request: MutationRequest) -> String {
    use rolodex::api::CrmApi;
    match request {
        MutationRequest::CreateCustomer(draft) => {
            harness.api.create_customer(&draft).await.unwrap();
            "Customer added successfully.".to_string()
        }
        MutationRequest::DeleteCustomer { id } => {
            harness.api.delete_customer(id).await.unwrap();
            "The customer has been deleted.".to_string()
        }
        other => panic!("unsupported in this test: {other:?}"),
    }
}

async fn run_mutation_err(
    harness: &Harness,
    request: MutationRequest,
) -> rolodex::query::FetchFailure {
    use rolodex::api::CrmApi;
    match request {
        MutationRequest::CreateCustomer(draft) => {
            let err = harness.api.create_customer(&draft).await.unwrap_err();
            rolodex::query::FetchFailure::from_error(&err)
        }
        other => panic!("unsupported in this test: {other:?}"),
    }
}
