pub mod header;
pub mod items;
pub mod wheel;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Screen};

const PROMPT_WIDTH: usize = 40;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    header::render_header(frame, app, chunks[0]);

    match (app.screen, app.wheel.as_ref()) {
        (Screen::Picker, Some(wheel)) => wheel::render_picker(frame, chunks[1], wheel, app.debug, app.frame),
        _ => items::render_items(frame, chunks[1], &app.store, app.selected),
    }

    render_footer(frame, chunks[2], app);

    // New item prompt (renders on top of everything)
    if app.entering_item {
        render_item_prompt(frame, frame.area(), &app.item_buffer);
    }
}

fn hint(key: &'static str, label: &'static str, enabled: bool) -> [Span<'static>; 2] {
    let (key_color, label_color) = if enabled {
        (Color::Rgb(80, 200, 255), Color::Rgb(100, 100, 130))
    } else {
        (Color::Rgb(60, 60, 80), Color::Rgb(60, 60, 80))
    };
    [
        Span::styled(key, Style::default().fg(key_color).add_modifier(Modifier::BOLD)),
        Span::styled(label, Style::default().fg(label_color)),
    ]
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = Vec::new();
    match app.screen {
        Screen::Items => {
            spans.extend(hint(" n", " new  ", true));
            spans.extend(hint("Enter", " pick randomly  ", app.store.can_pick()));
            spans.extend(hint("x", " delete  ", !app.store.is_empty()));
            spans.extend(hint("q", " quit", true));
        }
        Screen::Picker => {
            let spinning = app.is_spinning();
            spans.extend(hint(" Enter", " done  ", !spinning));
            spans.extend(hint("Esc", if spinning { " cancel  " } else { " close  " }, true));
            spans.extend(hint("d", " debug", true));
        }
    }
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("   {status}"),
            Style::default().fg(Color::Rgb(255, 215, 0)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_item_prompt(frame: &mut Frame, area: Rect, item_buffer: &str) {
    let overlay_w = 52u16.min(area.width.saturating_sub(4));
    let overlay_h = 9u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    // Clear background
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .title(" New Item ")
        .title_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    // Show typed chars + underscores for the remaining width
    let typed_len = item_buffer.chars().count();
    let remaining = PROMPT_WIDTH.saturating_sub(typed_len);
    let display_name = format!("{}{}", item_buffer, "_".repeat(remaining));

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Name of the new item:", Style::default().fg(Color::Rgb(180, 180, 200))),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [ ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(display_name, Style::default().fg(Color::Rgb(255, 255, 255)).add_modifier(Modifier::BOLD)),
            Span::styled(" ]", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
            Span::styled(" create  ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled("Esc", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
            Span::styled(" cancel", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
    ];

    let p = Paragraph::new(lines).style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}
