//! Search input component
//!
//! A single-line text input with a `/` prefix. Every keystroke is reported
//! upward; debouncing happens in the console, not here.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Props for the SearchBar component
#[derive(Default, Props)]
pub struct SearchBarProps {
    /// Current search input text
    pub value: String,
    /// Whether the search bar has focus
    pub has_focus: bool,
    /// Invoked with the new text on every keystroke
    pub on_change: Option<Handler<String>>,
}

/// Inline search input without borders
#[component]
pub fn SearchBar(props: &SearchBarProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let has_focus = props.has_focus;
    let on_change = props.on_change.clone();

    element! {
        View(
            flex_direction: FlexDirection::Row,
            width: 100pct,
            height: 1,
            padding_left: 1,
            padding_right: 1,
        ) {
            View(
                margin_right: 1,
                justify_content: JustifyContent::Center,
            ) {
                Text(
                    content: "/",
                    color: if has_focus { theme.border_focused } else { theme.text_dimmed },
                )
            }

            View(flex_grow: 1.0) {
                TextInput(
                    value: props.value.clone(),
                    has_focus: has_focus,
                    on_change: move |new_value: String| {
                        if let Some(ref handler) = on_change {
                            handler(new_value);
                        }
                    },
                    color: theme.text,
                )
            }
        }
    }
}
