//! Key event handling

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, Direction, View};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    model.clear_error().await;
                    drop(model);
                    self.retry().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Detail overlay is modal: only closing is accepted
        if model.has_open_detail().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter) {
                drop(model);
                self.back().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Search input
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Enter => {
                    let term = ui_state.search_input.clone();
                    drop(model);
                    if !term.trim().is_empty() {
                        self.perform_search(&term).await;
                    }
                }
                KeyCode::Esc | KeyCode::Tab => {
                    model.set_active_section(ActiveSection::Carousels).await;
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                }
                KeyCode::Char(c) => {
                    model.append_to_search(c).await;
                }
                _ => {}
            }
            return Ok(());
        }

        let now = Instant::now();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Up => {
                model.move_row_up().await;
            }
            KeyCode::Down => {
                model.move_row_down().await;
            }
            KeyCode::Left => {
                model.move_slot(Direction::Backward, now).await;
            }
            KeyCode::Right => {
                model.move_slot(Direction::Forward, now).await;
            }
            KeyCode::Char('[') => {
                model.advance_focused(Direction::Backward, now).await;
            }
            KeyCode::Char(']') => {
                model.advance_focused(Direction::Forward, now).await;
            }
            KeyCode::Enter => {
                drop(model);
                self.open_focused().await;
            }
            KeyCode::Esc | KeyCode::Backspace => {
                drop(model);
                self.back().await;
            }
            KeyCode::Char('/') | KeyCode::Char('s') | KeyCode::Char('S') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Tab => {
                model.clear_search_input().await;
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                drop(model);
                self.switch_view(View::Movies).await;
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                drop(model);
                self.switch_view(View::Tv).await;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                drop(model);
                self.retry().await;
            }
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => {
                model.toggle_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }

    /// Terminal resized. Card geometry is derived from the frame on the next
    /// draw; page and lock state are left alone.
    pub fn handle_resize(&self, width: u16, height: u16) {
        tracing::debug!(width, height, "Terminal resized");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::super::test_support::{controller, FakeCatalog};
    use crate::model::{ActiveSection, FeedState, TransitionState};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn rapid_page_requests_are_dropped_while_sliding() {
        let c = controller("/", Arc::new(FakeCatalog::default()));
        c.load_current_view(false).await.await.unwrap();

        // focus the upcoming row (20 items, three pages)
        c.handle_key_event(press(KeyCode::Down)).await.unwrap();
        c.handle_key_event(press(KeyCode::Char(']'))).await.unwrap();
        c.handle_key_event(press(KeyCode::Char(']'))).await.unwrap();
        c.handle_key_event(press(KeyCode::Char(']'))).await.unwrap();

        let content = c.model.lock().await.get_content_state().await;
        let row = content.carousel(1).unwrap();
        assert_eq!(row.cursor.page, 1);
        assert!(matches!(row.transition().state(), TransitionState::Transitioning { .. }));
        // other rows keep their own locks
        assert!(!content.carousel(2).unwrap().transition().is_locked());
    }

    #[tokio::test]
    async fn resize_keeps_page_and_lock() {
        let c = controller("/", Arc::new(FakeCatalog::default()));
        c.load_current_view(false).await.await.unwrap();
        c.handle_key_event(press(KeyCode::Down)).await.unwrap();
        c.handle_key_event(press(KeyCode::Char(']'))).await.unwrap();
        c.handle_resize(200, 50);

        let model = c.model.lock().await;
        let content = model.get_content_state().await;
        assert_eq!(content.carousel(1).unwrap().cursor.page, 1);
        assert!(content.carousel(1).unwrap().transition().is_locked());
    }

    #[tokio::test]
    async fn typing_a_search_and_pressing_enter() {
        let c = controller("/", Arc::new(FakeCatalog::default()));
        c.handle_key_event(press(KeyCode::Char('/'))).await.unwrap();
        for ch in "up".chars() {
            c.handle_key_event(press(KeyCode::Char(ch))).await.unwrap();
        }
        c.handle_key_event(press(KeyCode::Enter)).await.unwrap();

        let model = c.model.lock().await;
        let content = model.get_content_state().await;
        assert_eq!(content.location().search_term(), Some("up"));
        assert_eq!(content.carousels().len(), 2);
        assert!(content
            .carousels()
            .iter()
            .all(|row| !matches!(row.state, FeedState::Failed(_))));
        assert_eq!(model.get_ui_state().await.active_section, ActiveSection::Carousels);
    }

    #[tokio::test]
    async fn moving_right_past_the_page_edge_turns_the_page() {
        let c = controller("/", Arc::new(FakeCatalog::default()));
        c.load_current_view(false).await.await.unwrap();
        c.handle_key_event(press(KeyCode::Down)).await.unwrap();
        for _ in 0..5 {
            c.handle_key_event(press(KeyCode::Right)).await.unwrap();
        }
        let model = c.model.lock().await;
        assert_eq!(model.get_ui_state().await.focused_slot, 0);
        assert_eq!(model.get_content_state().await.carousel(1).unwrap().cursor.page, 1);
    }

    #[tokio::test]
    async fn ctrl_c_quits_from_search_input() {
        let c = controller("/", Arc::new(FakeCatalog::default()));
        c.handle_key_event(press(KeyCode::Char('/'))).await.unwrap();
        c.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .await
            .unwrap();
        assert!(c.model.lock().await.should_quit().await);
    }
}
