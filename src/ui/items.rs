use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::items::ItemStore;

pub fn render_items(frame: &mut Frame, area: Rect, store: &ItemStore, selected: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 80)))
        .title(format!(" {} items ", store.len()))
        .title_style(Style::default().fg(Color::Rgb(120, 120, 140)));

    if store.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        render_empty_state(frame, inner);
        return;
    }

    let rows: Vec<ListItem> = store
        .items()
        .iter()
        .map(|item| ListItem::new(Line::from(Span::styled(item.title.clone(), Style::default().fg(Color::Rgb(220, 220, 235))))))
        .collect();

    let list = List::new(rows)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .bg(Color::Rgb(30, 30, 45))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(selected.min(store.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_empty_state(frame: &mut Frame, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let lines = vec![
        Line::from(Span::styled(
            "No items yet.",
            Style::default().fg(Color::Rgb(180, 180, 200)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Add items using n to pick from them randomly.",
            Style::default().fg(Color::Rgb(120, 120, 140)),
        )),
    ];
    let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
    let text_area = Rect::new(area.x, top, area.width, (lines.len() as u16).min(area.height));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);
}
