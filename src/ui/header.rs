use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Screen};

const ACCENT: Color = Color::Rgb(255, 220, 80);
const MUTED: Color = Color::Rgb(120, 120, 140);

/// Title bar: the current screen and a one-line summary of the picker.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .border_type(BorderType::Rounded)
        .title(" 🎲 Random Picker ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );

    let line = Line::from(vec![
        Span::styled(
            format!(" {}", app.screen.title()),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))),
        Span::styled(summary(app), Style::default().fg(MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn summary(app: &App) -> String {
    match (app.screen, app.wheel.as_ref()) {
        (Screen::Picker, Some(wheel)) if wheel.is_spinning() => {
            format!("spinning through {} items", wheel.items().len())
        }
        (Screen::Picker, Some(wheel)) => match wheel.settled_item() {
            Some(item) => format!("picked \"{}\"", item.title),
            None => format!("{} items on the wheel", wheel.items().len()),
        },
        _ => match app.store.len() {
            0 => "no items".to_string(),
            1 => "1 item, add one more to pick".to_string(),
            n => format!("{n} items, ready to pick"),
        },
    }
}
