//! Console header: product name, tab bar, and session identity

use iocraft::prelude::*;

use crate::resource::Resource;
use crate::tui::theme::theme;

/// Props for the ConsoleHeader component
#[derive(Default, Props)]
pub struct ConsoleHeaderProps {
    /// Tabs available to the current role, in display order
    pub tabs: Vec<Resource>,
    /// The active tab
    pub active: Option<Resource>,
    /// "username (role)" for the right-hand corner
    pub identity: String,
    /// Whether a non-default filter is applied to the active view
    pub filtered: bool,
}

/// Top bar with tabs and session identity
#[component]
pub fn ConsoleHeader(props: &ConsoleHeaderProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let active = props.active;

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_direction: FlexDirection::Row,
            padding_left: 1,
            padding_right: 1,
            column_gap: 1,
            background_color: theme.border,
        ) {
            Text(content: "rolodex", color: theme.highlight, weight: Weight::Bold)
            Text(content: "|", color: theme.text_dimmed)

            #(props.tabs.iter().map(|tab| {
                let is_active = Some(*tab) == active;
                let title = tab.title().to_string();
                element! {
                    Text(
                        content: if is_active { format!("[{title}]") } else { format!(" {title} ") },
                        color: if is_active { theme.text } else { theme.text_dimmed },
                        weight: if is_active { Weight::Bold } else { Weight::Normal },
                    )
                }
            }))

            #(if props.filtered {
                Some(element! {
                    Text(content: "(filtered)", color: theme.sort_indicator)
                })
            } else {
                None
            })

            View(flex_grow: 1.0)
            Text(content: props.identity.clone(), color: theme.text_dimmed)
        }
    }
}
