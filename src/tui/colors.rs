//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Priority;

/// Used for high-priority rows.
pub const HIGH_RED: Color = Color::Rgb(214, 72, 72);
/// Used for medium-priority rows.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for low-priority rows.
pub const SLATE: Color = Color::Rgb(130, 140, 150);
/// Used for completed rows and empty-bucket placeholders.
pub const DIM_GREY: Color = Color::Rgb(90, 90, 90);

/// Row color for a priority.
pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::Low => SLATE,
        Priority::Medium => GOLD,
        Priority::High => HIGH_RED,
    }
}
