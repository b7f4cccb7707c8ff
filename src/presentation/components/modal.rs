use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use textwrap::wrap;

use super::super::view::ModalRender;
use super::layout::popup_rect;

const MAX_WIDTH: u16 = 52;
const DISMISS_HINT: &str = "Press Enter to continue";

pub fn render_modal(frame: &mut Frame<'_>, modal: &ModalRender<'_>) {
    let screen = frame.area();
    let width = MAX_WIDTH.min(screen.width.saturating_sub(4)).max(12);
    let text_width = width.saturating_sub(4) as usize;

    let mut lines: Vec<Line<'_>> = modal
        .body
        .lines()
        .flat_map(|line| {
            let wrapped = wrap(line, text_width.max(1));
            if wrapped.is_empty() {
                vec![Line::default()]
            } else {
                wrapped
                    .into_iter()
                    .map(|segment| Line::from(segment.into_owned()))
                    .collect()
            }
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        DISMISS_HINT,
        Style::default().fg(Color::DarkGray),
    )));

    let height = (lines.len() as u16 + 2).min(screen.height);
    let area = popup_rect(screen, width, height);
    let accent = if modal.success {
        Color::Green
    } else {
        Color::Red
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            format!(" {} ", modal.title),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
