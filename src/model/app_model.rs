//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use url::Url;

use super::catalog_client::CatalogSource;
use super::content::{ContentState, LoadRequest};
use super::detail::Selection;
use super::navigation::{Location, View};
use super::pagination::Direction;
use super::transition::AdvanceOutcome;
use super::types::{ActiveSection, ResultSet, Source, UiState};

/// Seconds an error popup stays up before clearing itself
const ERROR_DISPLAY_SECS: u64 = 5;

/// Main application model containing all state
pub struct AppModel {
    pub catalog: Option<Arc<dyn CatalogSource>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(start: Location, image_base: Url, transition: Duration) -> Self {
        let mut ui_state = UiState::default();
        if let Location::Search { term, .. } = &start {
            ui_state.search_input = term.clone();
        }
        Self {
            catalog: None,
            ui_state: Arc::new(Mutex::new(ui_state)),
            content_state: Arc::new(Mutex::new(ContentState::new(start, image_base, transition))),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_catalog(&mut self, catalog: Arc<dyn CatalogSource>) {
        self.catalog = Some(catalog);
    }

    pub fn get_catalog(&self) -> Option<Arc<dyn CatalogSource>> {
        self.catalog.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_input.push(c);
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_input.pop();
    }

    pub async fn clear_search_input(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_input.clear();
    }

    // --- Navigation ---

    pub async fn current_view(&self) -> View {
        self.content_state.lock().await.view()
    }

    pub async fn navigate(&self, location: Location) {
        let mut content = self.content_state.lock().await;
        let view_changed = content.view() != location.view();
        content.navigate(location);
        drop(content);
        if view_changed {
            self.reset_focus().await;
        }
    }

    pub async fn go_back(&self) -> bool {
        let mut content = self.content_state.lock().await;
        let before = content.view();
        let popped = content.go_back();
        let view_changed = content.view() != before;
        drop(content);
        if view_changed {
            self.reset_focus().await;
        }
        popped
    }

    pub async fn has_open_detail(&self) -> bool {
        self.content_state.lock().await.selection().is_some()
    }

    pub async fn open_detail(&self, selection: Selection) {
        self.content_state.lock().await.open_detail(selection);
    }

    pub async fn close_detail(&self) -> bool {
        self.content_state.lock().await.close_detail()
    }

    async fn reset_focus(&self) {
        let mut state = self.ui_state.lock().await;
        state.focused_row = 0;
        state.focused_slot = 0;
    }

    // --- Fetching ---

    pub async fn pending_loads(&self, force: bool) -> Vec<LoadRequest> {
        self.content_state.lock().await.pending_loads(force)
    }

    pub async fn apply_fetch(
        &self,
        source: Source,
        generation: u64,
        result: Result<ResultSet, String>,
    ) -> bool {
        self.content_state
            .lock()
            .await
            .apply_fetch(source, generation, result)
    }

    // --- Carousel focus and paging ---

    pub async fn move_row_up(&self) {
        let mut state = self.ui_state.lock().await;
        if state.focused_row > 0 {
            state.focused_row -= 1;
            state.focused_slot = 0;
        }
    }

    pub async fn move_row_down(&self) {
        let rows = self.content_state.lock().await.carousels().len();
        let mut state = self.ui_state.lock().await;
        if state.focused_row < rows.saturating_sub(1) {
            state.focused_row += 1;
            state.focused_slot = 0;
        }
    }

    /// Page the focused row; the slot is clamped to the new page.
    pub async fn advance_focused(&self, direction: Direction, now: Instant) -> AdvanceOutcome {
        let mut state = self.ui_state.lock().await;
        let mut content = self.content_state.lock().await;
        let Some(carousel) = content.carousel_mut(state.focused_row) else {
            return AdvanceOutcome::Ignored;
        };
        let outcome = carousel.request_advance(direction, now);
        let visible = carousel.visible().len();
        state.focused_slot = state.focused_slot.min(visible.saturating_sub(1));
        outcome
    }

    /// Move the highlighted card; stepping past either edge turns the page.
    pub async fn move_slot(&self, direction: Direction, now: Instant) -> AdvanceOutcome {
        let mut state = self.ui_state.lock().await;
        let mut content = self.content_state.lock().await;
        let Some(carousel) = content.carousel_mut(state.focused_row) else {
            return AdvanceOutcome::Ignored;
        };
        let visible = carousel.visible().len();
        match direction {
            Direction::Forward if state.focused_slot + 1 < visible => {
                state.focused_slot += 1;
                AdvanceOutcome::Ignored
            }
            Direction::Backward if state.focused_slot > 0 => {
                state.focused_slot -= 1;
                AdvanceOutcome::Ignored
            }
            _ => {
                let outcome = carousel.request_advance(direction, now);
                if let AdvanceOutcome::Advanced { .. } = outcome {
                    state.focused_slot = match direction {
                        Direction::Forward => 0,
                        Direction::Backward => carousel.visible().len().saturating_sub(1),
                    };
                }
                outcome
            }
        }
    }

    /// Selection for the highlighted card, if the row has one
    pub async fn focused_selection(&self) -> Option<Selection> {
        let state = self.ui_state.lock().await;
        let content = self.content_state.lock().await;
        let carousel = content.carousel(state.focused_row)?;
        carousel
            .visible()
            .get(state.focused_slot)
            .map(|item| Selection::new(carousel.source, item.id))
    }

    /// Advance animation clocks and expire old errors.
    pub async fn tick(&self, now: Instant) {
        self.content_state.lock().await.poll_transitions(now);
        self.auto_clear_old_errors().await;
    }

    // --- Errors and popups ---

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > ERROR_DISPLAY_SECS {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn toggle_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = !state.show_help_popup;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }
}
