//! Modal scaffolding
//!
//! A centered box over the main view with a title bar and a key-hint
//! footer. Forms, confirmations, errors, and the help screen all render
//! inside one of these.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Border tone of a modal
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalTone {
    #[default]
    Neutral,
    Warning,
    Error,
}

impl ModalTone {
    fn color(self) -> Color {
        match self {
            ModalTone::Neutral => theme().border_focused,
            ModalTone::Warning => Color::Yellow,
            ModalTone::Error => Color::Red,
        }
    }
}

/// Props for the Modal component
#[derive(Default, Props)]
pub struct ModalProps<'a> {
    pub title: String,
    /// Key hints shown under the content, e.g. "Enter: save | Esc: cancel"
    pub hints: String,
    pub tone: Option<ModalTone>,
    /// Width in columns
    pub width: Option<u32>,
    pub children: Vec<AnyElement<'a>>,
}

/// Centered modal box with title and hint footer
#[component]
pub fn Modal<'a>(props: &mut ModalProps<'a>) -> impl Into<AnyElement<'a>> {
    let theme = theme();
    let border_color = props.tone.unwrap_or_default().color();
    let width = props.width.unwrap_or(60);
    let title = props.title.clone();
    let hints = props.hints.clone();

    element! {
        View(
            width: 100pct,
            height: 100pct,
            position: Position::Absolute,
            top: 0,
            left: 0,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
        ) {
            View(
                width: width,
                background_color: theme.background,
                border_style: BorderStyle::Double,
                border_color: border_color,
                padding: 1,
                flex_direction: FlexDirection::Column,
            ) {
                View(
                    width: 100pct,
                    padding_bottom: 1,
                    border_edges: Edges::Bottom,
                    border_style: BorderStyle::Single,
                    border_color: theme.border,
                ) {
                    Text(content: title, color: border_color, weight: Weight::Bold)
                }

                View(
                    width: 100pct,
                    flex_direction: FlexDirection::Column,
                    padding_top: 1,
                    padding_bottom: 1,
                ) {
                    #(std::mem::take(&mut props.children))
                }

                #(if hints.is_empty() {
                    None
                } else {
                    Some(element! {
                        View(
                            width: 100pct,
                            padding_top: 1,
                            border_edges: Edges::Top,
                            border_style: BorderStyle::Single,
                            border_color: theme.border,
                        ) {
                            Text(content: hints, color: theme.text_dimmed)
                        }
                    })
                })
            }
        }
    }
}
