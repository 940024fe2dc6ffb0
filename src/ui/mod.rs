//! TUI components for git-branch-checkout

mod picker;

pub use picker::{FilterInputWidget, PickerItem, PickerListState, PickerListWidget};

use ratatui::style::Color;

/// Color scheme for the application
pub struct Theme {
    pub primary: Color,
    pub success: Color,
    pub muted: Color,
    pub bg: Color,
    pub fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(138, 180, 248), // Soft blue
            success: Color::Rgb(166, 218, 149), // Soft green
            muted: Color::Rgb(108, 112, 134),   // Gray
            bg: Color::Rgb(30, 30, 46),         // Dark base
            fg: Color::Rgb(205, 214, 244),      // Light text
        }
    }
}
