//! Pagination bar
//!
//! Shows the current position within the collection and grays out the
//! prev/next hints at the edges so the keys read as disabled. The page
//! range is `[0, total_pages)`; the bar displays it one-based.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Props for the PaginationBar component
#[derive(Default, Props)]
pub struct PaginationBarProps {
    /// Current zero-based page index
    pub page: u32,
    /// Total page count reported by the backend
    pub total_pages: u32,
}

/// One-line pagination status under the table
#[component]
pub fn PaginationBar(props: &PaginationBarProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let total = props.total_pages;
    let has_prev = props.page > 0;
    let has_next = total > 0 && props.page + 1 < total;

    let position = if total == 0 {
        "Page - of -".to_string()
    } else {
        format!("Page {} of {}", props.page + 1, total)
    };

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::Center,
            column_gap: 2,
        ) {
            Text(
                content: "[p] prev",
                color: if has_prev { theme.text } else { theme.text_dimmed },
            )
            Text(content: position, color: theme.text, weight: Weight::Bold)
            Text(
                content: "[n] next",
                color: if has_next { theme.text } else { theme.text_dimmed },
            )
        }
    }
}
