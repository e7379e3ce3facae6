//! Overlay rendering (detail overlay, error notification, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};
use url::Url;

use crate::model::{image_url, Item, MediaKind, Selection, UiState};
use super::utils::{centered_rect, format_date};

/// Dim everything behind the overlay, then draw the expanded item if the
/// selection resolved. An unresolved selection leaves only the dimmed shell.
pub fn render_detail_overlay(
    frame: &mut Frame,
    selection: &Selection,
    item: Option<&Item>,
    image_base: &Url,
) {
    let area = frame.area();
    frame
        .buffer_mut()
        .set_style(area, Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM));

    let Some(item) = item else {
        return;
    };

    let popup_area = centered_rect(area, 72, 18);
    frame.render_widget(Clear, popup_area);

    let release_label = match item.kind {
        MediaKind::Movie => "release",
        MediaKind::Tv => "first aired",
    };
    let mut lines = vec![
        Line::from(Span::styled(
            item.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(item.overview.clone(), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} : ", release_label), Style::default().fg(Color::DarkGray)),
            Span::raw(format_date(item.release_date)),
        ]),
    ];
    if let Some(vote) = item.vote_average {
        lines.push(Line::from(vec![
            Span::styled("rating : ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("★ {:.1}", vote), Style::default().fg(Color::Yellow)),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("backdrop : ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            image_url(image_base, item.backdrop_path.as_deref(), Some("w500")),
            Style::default().fg(Color::Cyan),
        ),
    ]));

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(format!(" {} ", selection.layout_key()))
                .title_bottom(Line::from(" Esc to close ").right_aligned())
                .padding(Padding::horizontal(1))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(detail, popup_area);
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4) as usize; // account for borders

        // Calculate how many lines the error message will take when wrapped
        let error_line_count =
            ((error_msg.chars().count() as f32) / (inner_width.max(1) as f32)).ceil() as u16;

        // Height: top border (1) + error lines + bottom border (1)
        let popup_height = (2 + error_line_count.max(1)).min(area.height.saturating_sub(4));

        let popup_area = Rect {
            x: area.width.saturating_sub(popup_width) / 2,
            y: area.height.saturating_sub(popup_height) / 2,
            width: popup_width,
            height: popup_height,
        };

        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss, r to retry) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Browse ──"),
        ("↑ / ↓", "Move between rows"),
        ("← / →", "Move between cards"),
        ("[ / ]", "Previous / next page"),
        ("Enter", "Open details"),
        ("Esc / Backspace", "Close details / go back"),
        ("", ""),
        ("", "── Views ──"),
        ("M", "Movies"),
        ("T", "TV shows"),
        ("/", "Focus search"),
        ("R", "Retry failed rows"),
        ("", ""),
        ("", "── General ──"),
        ("?", "Toggle this help"),
        ("Q / Ctrl+C", "Quit"),
    ];

    let popup_height = keybindings.len() as u16 + 2;
    let popup_area = centered_rect(area, 56, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^34}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>16}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (? or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
