// SPDX-License-Identifier: MPL-2.0
//! Shared color helpers and container styles for the deck chrome.

use iced::widget::container;
use iced::{Border, Color, Theme};

/// Standard color for muted/secondary text.
pub fn muted_text_color() -> Color {
    Color::from_rgb(0.60, 0.63, 0.70)
}

/// Standard color for error text.
pub fn error_text_color() -> Color {
    Color::from_rgb(0.91, 0.36, 0.36)
}

/// Highlight color for fired alarms and finished timers.
pub fn accent_text_color() -> Color {
    Color::from_rgb(0.98, 0.75, 0.24)
}

/// Pill behind the current-orientation label in the top bar.
pub fn badge(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(theme.extended_palette().background.weak.color.into()),
        border: Border {
            radius: 12.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// The motion-permission banner.
pub fn banner(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(theme.extended_palette().primary.weak.color.into()),
        border: Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Card behind the active tool.
pub fn panel(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(theme.extended_palette().background.weak.color.into()),
        border: Border {
            radius: 16.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
