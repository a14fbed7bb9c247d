//! Shared color constants for the UI.

use egui::Color32;

/// Forest green for success notifications.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for destructive notifications.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Accent of the header and the primary button.
pub const COLOR_ACCENT: Color32 = Color32::from_rgb(79, 70, 229);
