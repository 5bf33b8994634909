//! Record table
//!
//! Renders one page of records under a header row. Sortable columns carry
//! the digit that selects them; the active sort column shows its
//! direction. Status cells are colored per record type.

use iocraft::prelude::*;

use crate::formatting::truncate;
use crate::query::SortDirection;
use crate::resource::{Record, Resource};
use crate::tui::theme::theme;

/// Props for the RecordTable component
#[derive(Default, Props)]
pub struct RecordTableProps {
    pub resource: Option<Resource>,
    pub rows: Vec<Record>,
    pub selected_index: usize,
    pub sort_field: String,
    pub sort_dir: Option<SortDirection>,
}

fn pad(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    format!("{:width$}", cut, width = width)
}

/// Color for a record's status cell
fn status_color(record: &Record) -> Color {
    let theme = theme();
    match record {
        Record::Customer(c) => theme.customer_status_color(c.status),
        Record::Interaction(i) => theme.interaction_status_color(i.status),
        Record::Campaign(c) => theme.campaign_status_color(c.status),
    }
}

/// Table of the current page's rows
#[component]
pub fn RecordTable(props: &RecordTableProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(resource) = props.resource else {
        return element! { View() }.into_any();
    };
    let columns = resource.columns();

    // Header labels: sortable columns get their selection digit and, when
    // active, a direction arrow.
    let mut sortable_index = 0;
    let header_cells: Vec<(String, bool)> = columns
        .iter()
        .map(|column| {
            let label = match column.sort_key {
                Some(key) => {
                    sortable_index += 1;
                    let active = key == props.sort_field;
                    let arrow = match (active, props.sort_dir) {
                        (true, Some(SortDirection::Asc)) => " ^",
                        (true, Some(SortDirection::Desc)) => " v",
                        _ => "",
                    };
                    (format!("{} {}{}", sortable_index, column.title, arrow), active)
                }
                None => (format!("  {}", column.title), false),
            };
            label
        })
        .collect();

    let rows = props.rows.clone();
    let selected_index = props.selected_index;

    element! {
        View(
            width: 100pct,
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            padding_left: 1,
            padding_right: 1,
        ) {
            // Header row
            View(
                width: 100pct,
                flex_direction: FlexDirection::Row,
                column_gap: 2,
                border_edges: Edges::Bottom,
                border_style: BorderStyle::Single,
                border_color: theme.border,
            ) {
                #(header_cells.iter().zip(columns.iter()).map(|((label, active), column)| {
                    let content = pad(label, column.width);
                    let color = if *active { theme.sort_indicator } else { theme.text };
                    element! {
                        Text(content: content, color: color, weight: Weight::Bold)
                    }
                }))
            }

            // Data rows
            #(rows.iter().enumerate().map(|(row_index, record)| {
                let cells = record.cells();
                let is_selected = row_index == selected_index;
                let row_status_color = status_color(record);
                let row_cells: Vec<AnyElement<'static>> = columns
                    .iter()
                    .zip(cells.iter())
                    .map(|(column, cell)| {
                        let color = if column.title == "Status" {
                            row_status_color
                        } else if is_selected {
                            theme.text
                        } else {
                            theme.text_dimmed
                        };
                        element! {
                            Text(content: pad(cell, column.width), color: color)
                        }
                        .into_any()
                    })
                    .collect();

                element! {
                    View(
                        width: 100pct,
                        flex_direction: FlexDirection::Row,
                        column_gap: 2,
                        background_color: if is_selected { Some(theme.highlight) } else { None },
                    ) {
                        #(row_cells)
                    }
                }
            }))
        }
    }
    .into_any()
}
