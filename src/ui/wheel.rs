use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::items::Item;
use crate::wheel::{SlotStyle, VisibleSlot, WheelHandle};

const TEXT: (u8, u8, u8) = (235, 235, 245);
const BAND: Color = Color::Rgb(40, 40, 60);
/// Blur above which a slot is drawn dimmed.
const DIM_BLUR: f64 = 2.0;

pub fn render_picker(frame: &mut Frame, area: Rect, wheel: &WheelHandle, debug: bool, frame_count: u64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                           // Heading
            Constraint::Min(0),                              // Wheel
            Constraint::Length(if debug { 4 } else { 0 }),   // Debug strip
        ])
        .split(area);

    let heading = if wheel.is_spinning() {
        let dots = ".".repeat((frame_count / 10 % 4) as usize);
        format!("Picking randomly{dots}")
    } else {
        "Randomly picked:".to_string()
    };
    let p = Paragraph::new(Line::from(Span::styled(
        heading,
        Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(p, chunks[0]);

    let slots = wheel.visible_slots();
    render_wheel(frame, chunks[1], wheel.items(), &slots, wheel.config().radius, debug);

    if debug {
        render_debug_strip(frame, chunks[2], &slots, wheel.state().current_index);
    }
}

/// Draws the visible window with the center slot on the highlighted band.
pub fn render_wheel(
    frame: &mut Frame,
    area: Rect,
    items: &[Item],
    slots: &[VisibleSlot],
    radius: usize,
    debug: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }
    if items.is_empty() {
        let p = Paragraph::new("No items provided.").alignment(Alignment::Center);
        frame.render_widget(p, inner);
        return;
    }

    // Drop the outer slots symmetrically when the area is too short
    let fit = (inner.height.saturating_sub(1) / 2) as isize;
    let shown: Vec<VisibleSlot> = slots
        .iter()
        .filter(|s| s.angular_offset.abs() <= fit)
        .copied()
        .collect();
    let height = shown.len() as u16;
    let top = inner.y + inner.height.saturating_sub(height) / 2;

    if let Some(center_row) = shown.iter().position(VisibleSlot::is_center) {
        let band = Rect::new(inner.x, top + center_row as u16, inner.width, 1);
        frame.render_widget(Block::default().style(Style::default().bg(BAND)), band);
    }

    let lines = wheel_lines(items, &shown, radius, debug);
    let wheel_area = Rect::new(inner.x, top, inner.width, height.min(inner.height));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), wheel_area);
}

/// One line per slot. In debug mode each title carries its item index.
pub fn wheel_lines(items: &[Item], slots: &[VisibleSlot], radius: usize, debug: bool) -> Vec<Line<'static>> {
    slots
        .iter()
        .map(|slot| {
            let mut title = items
                .get(slot.item_index)
                .map(|item| item.title.clone())
                .unwrap_or_default();
            if debug {
                title = format!("{title} : {}", slot.item_index);
            }
            let style = SlotStyle::for_offset(slot.angular_offset, radius);
            Line::from(Span::styled(title, slot_style(&style, slot.is_center())))
        })
        .collect()
}

fn slot_style(style: &SlotStyle, center: bool) -> Style {
    let fade = |c: u8| (f64::from(c) * style.opacity).round() as u8;
    let (r, g, b) = TEXT;
    let mut s = Style::default().fg(Color::Rgb(fade(r), fade(g), fade(b)));
    if center {
        s = s.add_modifier(Modifier::BOLD);
    }
    if style.blur >= DIM_BLUR {
        s = s.add_modifier(Modifier::DIM);
    }
    s
}

fn render_debug_strip(frame: &mut Frame, area: Rect, slots: &[VisibleSlot], current_index: usize) {
    let indices: Vec<Span> = slots
        .iter()
        .map(|s| {
            let style = if s.is_center() {
                Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(140, 140, 140))
            };
            Span::styled(format!("{} ", s.item_index), style)
        })
        .collect();

    let lines = vec![
        Line::from(indices),
        Line::from(Span::styled(
            format!("frame size: {}  index: {}", slots.len(), current_index),
            Style::default().fg(Color::Rgb(100, 100, 120)),
        )),
        Line::from(vec![
            Span::styled("↑ / ↓", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
            Span::styled(" step", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 80)))
        .title(" debug ");
    let p = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    frame.render_widget(p, area);
}
