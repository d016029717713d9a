// LeadDesk - ui/theme.rs
//
// Colour scheme, disposition colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{Disposition, Theme};
use egui::Color32;

/// Apply the persisted light/dark preference and the configured font size.
pub fn apply(ctx: &egui::Context, theme: Theme, font_size: f32) {
    ctx.set_theme(if theme.is_dark() {
        egui::Theme::Dark
    } else {
        egui::Theme::Light
    });
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                egui::TextStyle::Heading => font_size * 1.45,
                egui::TextStyle::Small => font_size * 0.75,
                egui::TextStyle::Monospace => font_size * 0.9,
                _ => font_size,
            };
        }
    });
}

/// Badge text colour for a disposition.
pub fn disposition_colour(disposition: Disposition, dark_mode: bool) -> Color32 {
    match (disposition, dark_mode) {
        (Disposition::Pending, false) => Color32::from_rgb(133, 77, 14), // Yellow 800
        (Disposition::Pending, true) => Color32::from_rgb(250, 204, 21), // Yellow 400
        (Disposition::Interested, false) => Color32::from_rgb(22, 101, 52), // Green 800
        (Disposition::Interested, true) => Color32::from_rgb(74, 222, 128), // Green 400
        (Disposition::NotInterested, false) => Color32::from_rgb(153, 27, 27), // Red 800
        (Disposition::NotInterested, true) => Color32::from_rgb(248, 113, 113), // Red 400
        (Disposition::Unavailable, false) => Color32::from_rgb(31, 41, 55), // Gray 800
        (Disposition::Unavailable, true) => Color32::from_rgb(156, 163, 175), // Gray 400
        (Disposition::Corporate, false) => Color32::from_rgb(107, 33, 168), // Purple 800
        (Disposition::Corporate, true) => Color32::from_rgb(192, 132, 252), // Purple 400
    }
}

/// Badge background tint for a disposition.
pub fn disposition_bg_colour(disposition: Disposition) -> Color32 {
    match disposition {
        Disposition::Pending => Color32::from_rgba_unmultiplied(234, 179, 8, 40),
        Disposition::Interested => Color32::from_rgba_unmultiplied(34, 197, 94, 40),
        Disposition::NotInterested => Color32::from_rgba_unmultiplied(239, 68, 68, 40),
        Disposition::Unavailable => Color32::from_rgba_unmultiplied(107, 114, 128, 40),
        Disposition::Corporate => Color32::from_rgba_unmultiplied(168, 85, 247, 40),
    }
}

/// Bar colour on the dashboard for the "Total Leads" card.
pub const TOTAL_COLOUR: Color32 = Color32::from_rgb(59, 130, 246); // Blue 500

/// Phone number highlight after a copy to clipboard.
pub const COPIED_COLOUR: Color32 = Color32::from_rgb(34, 197, 94); // Green 500

/// Marker colour for a phone number that did not normalise cleanly.
pub const NON_CANONICAL_PHONE_COLOUR: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600

/// Destructive action accent (delete, clear all).
pub const DANGER_COLOUR: Color32 = Color32::from_rgb(220, 38, 38); // Red 600

/// Layout constants.
pub const ROW_HEIGHT: f32 = 24.0;
pub const STAT_CARD_WIDTH: f32 = 150.0;
pub const SEARCH_BOX_WIDTH: f32 = 240.0;
pub const MAX_PAGE_BUTTONS: usize = 5;
