//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (text truncation, popup geometry)
//! - `layout`: Top bar with view tabs and the search input
//! - `content`: Hero banner and carousel rows
//! - `overlays`: Modal overlays (detail, error, help)

mod utils;
mod layout;
mod content;
mod overlays;

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, content_state: &ContentState, now: Instant) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs + search
                Constraint::Min(0),    // Banner + carousels
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, content_state);

        content::render_main_content(frame, chunks[1], ui_state, content_state, now);

        layout::render_status_line(frame, chunks[2], content_state);

        // Detail overlay (if a selection is open)
        if let Some(selection) = content_state.selection() {
            overlays::render_detail_overlay(
                frame,
                selection,
                content_state.resolve_selection(),
                &content_state.image_base,
            );
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
