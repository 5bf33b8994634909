pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod formatting;
pub mod query;
pub mod resource;
pub mod session;
pub mod tui;

pub use api::{CrmApi, HttpApi};
pub use config::Config;
pub use error::{Result, RolodexError};
pub use query::{
    Debouncer, FetchFailure, FetchSequencer, FILTER_ALL, ListQuery, PageParams, PageResult,
    SortDirection,
};
pub use resource::{Record, Resource};
pub use session::{Role, Session};
