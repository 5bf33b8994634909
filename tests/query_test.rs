//! End-to-end properties of the query controller: debounced search, fetch
//! idempotence, stale-response suppression, and failure handling, driven
//! through the same reducer wiring the console uses.

mod common;

use std::time::Duration;

use common::{Harness, MockApi, make_interaction};
use rolodex::api::types::InteractionKind;
use rolodex::session::Role;
use rolodex::tui::console::ConsoleAction;

#[tokio::test(start_paused = true)]
async fn rapid_keystrokes_issue_one_fetch_with_final_value() {
    let harness = Harness::admin(MockApi::with_customers(5));
    harness.settle().await;
    assert_eq!(harness.api.recorded_calls().len(), 1);

    // "john" typed as five keystrokes, 50ms apart, with a 500ms debounce.
    let mut typing = Vec::new();
    for prefix in ["j", "jo", "joh", "john", "john"] {
        typing.push(harness.type_search(prefix));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    for task in typing {
        task.await.unwrap();
    }
    harness.settle().await;

    // Exactly one additional fetch, carrying the final search value; the
    // intermediate prefixes never reached the backend.
    let calls = harness.api.recorded_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].search, "john");
    assert!(!calls.iter().any(|c| c.search == "j" || c.search == "joh"));
}

#[tokio::test(start_paused = true)]
async fn search_settles_five_hundred_millis_after_last_keystroke() {
    let harness = Harness::admin(MockApi::with_customers(5));
    harness.settle().await;

    let start = tokio::time::Instant::now();
    let task = harness.type_search("john");
    task.await.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed < Duration::from_millis(600));
    assert_eq!(harness.snapshot().query.search, "john");
}

#[tokio::test(start_paused = true)]
async fn identical_params_yield_identical_pages() {
    let harness = Harness::admin(MockApi::with_customers(25));
    harness.settle().await;
    let first = harness.displayed_labels();

    harness.dispatch(ConsoleAction::Refresh);
    harness.settle().await;
    let second = harness.displayed_labels();

    assert_eq!(first, second);
    let calls = harness.api.recorded_calls();
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test(start_paused = true)]
async fn stale_response_never_overwrites_newer_page() {
    // Page 0 unfiltered is slow; a filter change fires a fast request
    // before the slow one lands. The slow reply arrives last and must be
    // discarded.
    let api = MockApi::default();
    *api.interactions.lock().unwrap() = vec![
        make_interaction(1, InteractionKind::Call, "Intro call"),
        make_interaction(2, InteractionKind::Email, "Pricing email"),
        make_interaction(3, InteractionKind::Call, "Follow-up call"),
        make_interaction(4, InteractionKind::Meeting, "Onsite meeting"),
    ];
    api.push_delay(Duration::from_millis(300));
    api.push_delay(Duration::from_millis(10));

    let harness = Harness::new(Role::Customer, api, Duration::from_millis(500));

    // Invocation A: the initial, filterless fetch.
    let slow = harness.drain_fetch().unwrap();
    // Let A reach its sleep before superseding it.
    tokio::time::sleep(Duration::from_millis(1)).await;

    // Invocation B: filter to calls only.
    harness.dispatch(ConsoleAction::CycleFilter);
    assert_eq!(harness.snapshot().query.filter.as_deref(), Some("call"));
    let fast = harness.drain_fetch().unwrap();

    fast.await.unwrap();
    let after_fast = harness.displayed_labels();
    // Calls only, newest first per the default date sort.
    assert_eq!(after_fast, vec!["Follow-up call", "Intro call"]);

    slow.await.unwrap();
    let after_slow = harness.displayed_labels();

    // The displayed result reflects the filtered request, not the stale
    // filterless one.
    assert_eq!(after_slow, after_fast);
    assert!(!harness.snapshot().loading);
}

#[tokio::test(start_paused = true)]
async fn stale_response_does_not_clear_loading_flag() {
    let api = MockApi::with_customers(3);
    api.push_delay(Duration::from_millis(50));
    api.push_delay(Duration::from_millis(400));

    let harness = Harness::admin(api);

    // A is quick, but superseded before its reply is applied.
    let first = harness.drain_fetch().unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;
    harness.dispatch(ConsoleAction::Refresh);
    let second = harness.drain_fetch().unwrap();

    first.await.unwrap();
    // The first (stale) settlement must leave the loading indicator up;
    // the second request still owns it.
    assert!(harness.snapshot().loading);

    second.await.unwrap();
    assert!(!harness.snapshot().loading);
}

#[tokio::test(start_paused = true)]
async fn failed_latest_fetch_keeps_previous_rows_and_does_not_retry() {
    let harness = Harness::admin(MockApi::with_customers(3));
    harness.settle().await;
    assert_eq!(harness.displayed_labels().len(), 3);

    harness.api.fail_next_lists(Some(500));
    harness.dispatch(ConsoleAction::Refresh);
    harness.settle().await;

    let state = harness.snapshot();
    // Previous rows stay on screen, the failure is surfaced once, and no
    // automatic retry is issued.
    assert_eq!(state.page.len(), 3);
    assert!(state.toast.is_some());
    assert_eq!(
        state.last_error.as_ref().unwrap().title,
        "Server Error (500)"
    );
    assert_eq!(harness.api.recorded_calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn recovery_after_failure_clears_error_indicator() {
    let harness = Harness::admin(MockApi::with_customers(3));
    harness.settle().await;

    harness.api.fail_next_lists(Some(503));
    harness.dispatch(ConsoleAction::Refresh);
    harness.settle().await;
    assert!(harness.snapshot().last_error.is_some());

    harness.api.fail_next_lists(None);
    harness.dispatch(ConsoleAction::Refresh);
    harness.settle().await;
    assert!(harness.snapshot().last_error.is_none());
}

#[tokio::test(start_paused = true)]
async fn debounced_search_resets_to_first_page() {
    let harness = Harness::admin(MockApi::with_customers(35));
    harness.settle().await;

    harness.dispatch(ConsoleAction::NextPage);
    harness.settle().await;
    assert_eq!(harness.snapshot().query.page, 1);

    let task = harness.type_search("user0");
    task.await.unwrap();
    harness.settle().await;

    let state = harness.snapshot();
    assert_eq!(state.query.page, 0);
    let calls = harness.api.recorded_calls();
    let last_call = calls.last().unwrap();
    assert_eq!(last_call.page, 0);
    assert_eq!(last_call.search, "user0");
}
