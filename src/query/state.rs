//! Query state for paginated collection views.
//!
//! Every list surface (console tabs and the `ls` commands) drives its
//! fetches through a [`ListQuery`]: free-text search, a sort column with
//! direction, an optional categorical filter, and a page index. The derived
//! [`PageParams`] are what actually go on the wire.

use crate::error::{Result, RolodexError};

/// Sentinel filter value meaning "no filtering on this axis".
///
/// The backend expects the filter key to be present with an empty value in
/// that case, so [`PageParams`] translates it to `""`.
pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = RolodexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(RolodexError::Other(format!(
                "unknown sort direction '{}', expected 'asc' or 'desc'",
                s
            ))),
        }
    }
}

/// User-editable query state for one collection view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Raw search input, mutated on every keystroke
    pub search_input: String,
    /// Settled search text; the only search value that reaches the wire
    pub search: String,
    pub sort_field: String,
    pub sort_dir: SortDirection,
    /// `None` when the view has no filter axis
    pub filter: Option<String>,
    pub page: u32,
}

impl ListQuery {
    pub fn new(sort_field: &str, sort_dir: SortDirection, filter: Option<&str>) -> Self {
        Self {
            search_input: String::new(),
            search: String::new(),
            sort_field: sort_field.to_string(),
            sort_dir,
            filter: filter.map(|f| f.to_string()),
            page: 0,
        }
    }

    /// Record a keystroke. Does not touch the settled search text or the
    /// page; the caller is expected to run the input through a
    /// [`Debouncer`](crate::query::Debouncer) and call [`settle_search`]
    /// with whatever survives the quiet period.
    ///
    /// [`settle_search`]: ListQuery::settle_search
    pub fn set_search_input(&mut self, input: &str) {
        self.search_input = input.to_string();
    }

    /// Apply a settled search value. Returns true when the value differs
    /// from the current one, meaning a refetch is due; the page resets to 0
    /// in that case because the old page numbering is meaningless for a new
    /// search.
    pub fn settle_search(&mut self, value: &str) -> bool {
        if self.search == value {
            return false;
        }
        self.search = value.to_string();
        self.page = 0;
        true
    }

    /// Select a sort column. Re-selecting the current column flips the
    /// direction; a new column sorts ascending. Either way the page resets.
    pub fn sort_by(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_dir = self.sort_dir.toggle();
        } else {
            self.sort_field = field.to_string();
            self.sort_dir = SortDirection::Asc;
        }
        self.page = 0;
    }

    /// Change the categorical filter. Returns true when the value changed.
    /// No-op on views without a filter axis.
    pub fn set_filter(&mut self, value: &str) -> bool {
        match &self.filter {
            Some(current) if current == value => false,
            Some(_) => {
                self.filter = Some(value.to_string());
                self.page = 0;
                true
            }
            None => false,
        }
    }

    /// Jump to a page. The render surface disables out-of-range buttons,
    /// but clamp anyway when the page count is known.
    pub fn set_page(&mut self, page: u32, total_pages: Option<u32>) {
        self.page = match total_pages {
            Some(0) => 0,
            Some(total) => page.min(total - 1),
            None => page,
        };
    }

    pub fn next_page(&mut self, total_pages: u32) {
        if self.page + 1 < total_pages {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Derive the request parameters for the current state.
    ///
    /// `filter_key` names the backend's query parameter for the filter axis
    /// (e.g. `type` for interactions); it is ignored when the view has no
    /// filter. A filter of [`FILTER_ALL`] is sent as an empty string rather
    /// than omitted.
    pub fn params(&self, size: u32, filter_key: Option<&str>) -> PageParams {
        let filter = match (&self.filter, filter_key) {
            (Some(value), Some(key)) => {
                let wire_value = if value == FILTER_ALL { "" } else { value };
                Some((key.to_string(), wire_value.to_string()))
            }
            _ => None,
        };

        PageParams {
            page: self.page,
            size,
            sort: format!("{},{}", self.sort_field, self.sort_dir.as_str()),
            search: self.search.clone(),
            filter,
        }
    }
}

/// Derived request parameters for one fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub size: u32,
    /// `"<field>,<asc|desc>"`, the backend's composite sort parameter
    pub sort: String,
    pub search: String,
    /// Optional `(key, value)` filter pair; empty value means "all"
    pub filter: Option<(String, String)>,
}

impl PageParams {
    /// Flatten into query-string pairs. Placeholder values stay present as
    /// empty strings; the backend tolerates them.
    pub fn as_query(&self) -> Vec<(&str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort.clone()),
            ("search", self.search.clone()),
        ];
        if let Some((key, value)) = &self.filter {
            pairs.push((key.as_str(), value.clone()));
        }
        pairs
    }
}
