//! Utility functions for rendering UI components

use chrono::NaiveDate;
use ratatui::layout::Rect;

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// A popup of at most `width` x `height` centred in `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Place a `width`-wide card at `x` (which may lie outside `area`) and clip
/// it to the row. Returns `None` when nothing of it is visible.
pub fn shifted_rect(area: Rect, x: i32, width: u16) -> Option<Rect> {
    let left = i32::from(area.x);
    let right = left + i32::from(area.width);
    let start = x.max(left);
    let end = (x + i32::from(width)).min(right);
    if end <= start {
        return None;
    }
    Some(Rect {
        x: start as u16,
        y: area.y,
        width: (end - start) as u16,
        height: area.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_string("Blade Runner", 8), "Blade...");
        assert_eq!(truncate_string("Heat", 8), "Heat");
    }

    #[test]
    fn shifted_cards_are_clipped_to_the_row() {
        let row = Rect::new(10, 2, 50, 5);
        assert_eq!(shifted_rect(row, 20, 10), Some(Rect::new(20, 2, 10, 5)));
        assert_eq!(shifted_rect(row, 55, 10), Some(Rect::new(55, 2, 5, 5)));
        assert_eq!(shifted_rect(row, 5, 10), Some(Rect::new(10, 2, 5, 5)));
        assert_eq!(shifted_rect(row, 60, 10), None);
        assert_eq!(shifted_rect(row, -40, 10), None);
    }

    #[test]
    fn centered_popup_fits_small_terminals() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered_rect(area, 80, 30);
        assert!(popup.width <= 36 && popup.height <= 8);
        assert_eq!(popup.x, 2);
    }
}
