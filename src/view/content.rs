//! Main content area rendering (hero banner and carousel rows)

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{
    image_url, layout_key, ActiveSection, Carousel, ContentState, FeedState, Item, UiState, View,
};
use super::utils::{format_date, shifted_rect, truncate_string};

const BANNER_HEIGHT: u16 = 6;

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    now: Instant,
) {
    let view = content_state.view();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(BANNER_HEIGHT), Constraint::Min(0)])
        .split(area);

    match view {
        View::Movies | View::Tv => render_banner(frame, chunks[0], content_state),
        View::Search => render_search_header(frame, chunks[0], content_state),
    }

    let rows = content_state.carousels();
    if rows.is_empty() {
        return;
    }
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows.iter().map(|_| Constraint::Ratio(1, rows.len() as u32)))
        .split(chunks[1]);

    let open_key = content_state.selection().map(|s| s.layout_key());
    let carousels_focused = ui_state.active_section == ActiveSection::Carousels;

    for (index, (carousel, row_area)) in rows.iter().zip(row_areas.iter()).enumerate() {
        let focused_slot = if index == ui_state.focused_row {
            Some(ui_state.focused_slot)
        } else {
            None
        };
        render_carousel(
            frame,
            *row_area,
            carousel,
            focused_slot,
            carousels_focused,
            open_key.as_deref(),
            now,
        );
    }
}

fn render_banner(frame: &mut Frame, area: Rect, content_state: &ContentState) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .padding(Padding::horizontal(2));

    let Some(hero) = content_state.hero() else {
        let lead = content_state.carousels().first();
        let text = match lead.map(|c| &c.state) {
            Some(FeedState::Failed(message)) => {
                Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red)))
            }
            _ => Line::from(Span::styled("Loading...", Style::default().fg(Color::Yellow))),
        };
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let backdrop = image_url(&content_state.image_base, hero.backdrop_path.as_deref(), None);
    let lines = vec![
        Line::from(Span::styled(
            hero.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hero.overview.clone(), Style::default().fg(Color::Gray))),
        Line::from(Span::styled(backdrop, Style::default().fg(Color::DarkGray))),
    ];
    let banner = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(banner, area);
}

fn render_search_header(frame: &mut Frame, area: Rect, content_state: &ContentState) {
    let term = content_state.location().search_term().unwrap_or_default();
    let text = if term.is_empty() {
        Line::from(Span::styled(
            "Type a keyword and press Enter",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled("Results for ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("\"{}\"", term),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ])
    };
    let header = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(header, area);
}

fn render_carousel(
    frame: &mut Frame,
    area: Rect,
    carousel: &Carousel,
    focused_slot: Option<usize>,
    carousels_focused: bool,
    open_key: Option<&str>,
    now: Instant,
) {
    let is_focused = focused_slot.is_some() && carousels_focused;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(row_title(carousel))
        .border_style(border_style);
    // Navigation controls only when there is more than one page to show
    if carousel.pagination_enabled() {
        let pager = format!(" ‹ {}/{} › ", carousel.cursor.page + 1, carousel.page_count());
        block = block.title_bottom(Line::from(pager).right_aligned());
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &carousel.state {
        FeedState::Loading => {
            let loading = Paragraph::new("Loading...").style(Style::default().fg(Color::Yellow));
            frame.render_widget(loading, inner);
        }
        FeedState::Failed(message) => {
            let failed = Paragraph::new(vec![
                Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
                Line::from(Span::styled("Press r to retry", Style::default().fg(Color::DarkGray))),
            ]);
            frame.render_widget(failed, inner);
        }
        FeedState::Loaded(set) if set.is_empty() => {
            let empty = Paragraph::new("  Nothing here").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, inner);
        }
        FeedState::Loaded(_) => {
            let page_size = carousel.source.page_size().max(1) as u16;
            let card_width = inner.width / page_size;
            let transition = carousel.transition();

            // The page being left slides out first, the new one is drawn over it
            let outgoing = transition.outgoing_offset(inner.width, now);
            for (slot, item) in carousel.outgoing().iter().enumerate() {
                let x = i32::from(inner.x) + i32::from(card_width) * slot as i32 + outgoing;
                if let Some(card_area) = shifted_rect(inner, x, card_width) {
                    render_card(frame, card_area, item, false, false);
                }
            }

            let incoming = transition.incoming_offset(inner.width, now);
            for (slot, item) in carousel.visible().iter().enumerate() {
                let x = i32::from(inner.x) + i32::from(card_width) * slot as i32 + incoming;
                let Some(card_area) = shifted_rect(inner, x, card_width) else {
                    continue;
                };
                let highlighted = is_focused && focused_slot == Some(slot);
                let is_open = open_key == Some(layout_key(carousel.source, item.id).as_str());
                render_card(frame, card_area, item, highlighted, is_open);
            }
        }
    }
}

fn row_title(carousel: &Carousel) -> String {
    match carousel.result_set() {
        Some(set) => format!(" {} ({}) ", carousel.source.title(), set.total_results),
        None => format!(" {} ", carousel.source.title()),
    }
}

fn render_card(frame: &mut Frame, area: Rect, item: &Item, highlighted: bool, is_open: bool) {
    let border_style = if is_open {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if highlighted {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if highlighted {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let text_width = area.width.saturating_sub(2) as usize;
    let mut lines = vec![
        Line::from(Span::styled(truncate_string(&item.title, text_width), title_style)),
        Line::from(Span::styled(
            format_date(item.release_date),
            Style::default().fg(Color::Gray),
        )),
    ];
    if let Some(vote) = item.vote_average {
        lines.push(Line::from(Span::styled(
            format!("★ {:.1}", vote),
            Style::default().fg(Color::Yellow),
        )));
    }

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}
