//! Fetch sequencing and result types for collection views.
//!
//! Requests race: a slow response for page 0 must not overwrite the data of
//! a filter change issued afterwards. Every fetch takes a token from a
//! [`FetchSequencer`]; only the holder of the most recent token may apply
//! its result or clear the loading indicator. Stale results, successful or
//! failed, are dropped without a trace.

use crate::api::types::Page;
use crate::error::RolodexError;

/// Render-ready page of rows, replaced wholesale on every successful fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
        }
    }
}

impl<T> From<Page<T>> for PageResult<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            items: page.content,
            total_pages: page.total_pages,
        }
    }
}

impl<T> PageResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Displayable failure of a fetch, carried through actions and toasts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub title: String,
    pub message: String,
}

impl FetchFailure {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn from_error(err: &RolodexError) -> Self {
        match err {
            RolodexError::Network(msg) => Self::new("Network Error", msg.clone()),
            RolodexError::Server { status, message } => {
                Self::new(format!("Server Error ({status})"), message.clone())
            }
            RolodexError::SessionExpired => Self::new("Session Expired", err.to_string()),
            other => Self::new("Error", other.to_string()),
        }
    }
}

/// Issues monotonically increasing fetch tokens; the newest token wins.
///
/// Lives inside single-threaded view state, so a plain counter is enough;
/// the UI event loop never hands out two tokens concurrently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSequencer {
    issued: u64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, superseding every outstanding one
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// True while `token` belongs to the most recent fetch
    pub fn is_current(&self, token: u64) -> bool {
        token == self.issued
    }

    /// True when at least one fetch has been started
    pub fn has_started(&self) -> bool {
        self.issued > 0
    }
}
