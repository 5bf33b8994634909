//! Empty state component
//!
//! Displays placeholder messages while a list is loading or when a page
//! comes back with no rows.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Type of empty state to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyStateKind {
    /// A fetch for this view is in flight
    Loading,
    /// The collection has no rows at all
    #[default]
    NoRows,
    /// The current search/filter matched nothing
    NoMatches,
}

/// Props for the EmptyState component
#[derive(Default, Props)]
pub struct EmptyStateProps {
    /// The kind of empty state to display
    pub kind: EmptyStateKind,
    /// Lowercase plural of the collection, e.g. "customers"
    pub what: String,
}

/// Empty state display with helpful message
#[component]
pub fn EmptyState(props: &EmptyStateProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let (title, message) = match props.kind {
        EmptyStateKind::Loading => ("Loading".to_string(), format!("Loading {}...", props.what)),
        EmptyStateKind::NoRows => (
            format!("No {} found.", props.what),
            String::new(),
        ),
        EmptyStateKind::NoMatches => (
            "No results".to_string(),
            "Nothing matches the current search or filter. Press Esc to clear.".to_string(),
        ),
    };

    element! {
        View(
            width: 100pct,
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            padding: 2,
        ) {
            Text(content: title, color: theme.text, weight: Weight::Bold)
            #(if message.is_empty() {
                None
            } else {
                Some(element! {
                    Text(content: message, color: theme.text_dimmed)
                })
            })
        }
    }
}
