//! Layout rendering (top bar, status line)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, ContentState, UiState, View};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, content_state: &ContentState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30), // View tabs
            Constraint::Min(0),     // Search input
        ])
        .split(area);

    let current = content_state.view();
    let tabs: Vec<Span> = [(View::Movies, "m"), (View::Tv, "t"), (View::Search, "/")]
        .iter()
        .flat_map(|(view, key)| {
            let style = if *view == current {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            vec![
                Span::styled(format!("{} ", view.title()), style),
                Span::styled(format!("[{}]", key), Style::default().fg(Color::DarkGray)),
                Span::raw("  "),
            ]
        })
        .collect();

    let tabs = Paragraph::new(Line::from(tabs)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" reelview ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(tabs, chunks[0]);

    let focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_input.is_empty() && !focused {
        "Press / to search movies and TV shows"
    } else {
        ui_state.search_input.as_str()
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(if focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(search, chunks[1]);
}

pub fn render_status_line(frame: &mut Frame, area: Rect, content_state: &ContentState) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", content_state.location().path()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            " ↑↓ row  ←→ card  [ ] page  Enter open  Esc back  ? help ",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if content_state.any_failed() {
        spans.push(Span::styled(
            " r retry ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
