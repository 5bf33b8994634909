//! Remote-collection query controller.
//!
//! The building blocks every paginated list view shares: debounced search
//! input ([`Debouncer`]), user-editable query state with derived request
//! parameters ([`ListQuery`]/[`PageParams`]), and last-request-wins fetch
//! sequencing ([`FetchSequencer`]/[`PageResult`]). The console reducer and
//! the non-interactive `ls` commands are both built on these.

pub mod debounce;
pub mod fetch;
pub mod state;

pub use debounce::Debouncer;
pub use fetch::{FetchFailure, FetchSequencer, PageResult};
pub use state::{FILTER_ALL, ListQuery, PageParams, SortDirection};
