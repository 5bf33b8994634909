//! Theme system for TUI colors and styles
//!
//! Defines color constants consistent with the CLI output (commands/mod.rs).

use iocraft::prelude::Color;

use crate::api::types::{CampaignStatus, CustomerStatus, InteractionStatus};

/// Theme configuration for TUI components
#[derive(Debug, Clone)]
pub struct Theme {
    // Record status colors (consistent with the CLI)
    pub status_active: Color,
    pub status_pending: Color,
    pub status_done: Color,
    pub status_draft: Color,
    pub status_scheduled: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub error: Color,
    pub sort_indicator: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_active: Color::Green,
            status_pending: Color::Yellow,
            status_done: Color::Green,
            status_draft: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            status_scheduled: Color::Cyan,

            border: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            highlight: Color::Blue,
            error: Color::Red,
            sort_indicator: Color::Yellow,
        }
    }
}

impl Theme {
    pub fn customer_status_color(&self, status: CustomerStatus) -> Color {
        match status {
            CustomerStatus::Active => self.status_active,
            CustomerStatus::Pending => self.status_pending,
        }
    }

    pub fn interaction_status_color(&self, status: InteractionStatus) -> Color {
        match status {
            InteractionStatus::Completed => self.status_done,
            InteractionStatus::Scheduled => self.status_scheduled,
            InteractionStatus::Pending => self.status_pending,
        }
    }

    pub fn campaign_status_color(&self, status: CampaignStatus) -> Color {
        match status {
            CampaignStatus::Draft => self.status_draft,
            CampaignStatus::Scheduled => self.status_scheduled,
            CampaignStatus::Sent => self.status_done,
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    &THEME
}
