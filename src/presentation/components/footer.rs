use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::focus::{FormSlot, Pane};

use super::super::view::UiContext;

pub fn render_title(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let title = Paragraph::new(Line::from(Span::styled(
        ctx.title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, area);
}

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let actions = ctx.help.unwrap_or(" ");
    let actions_widget = Paragraph::new(format!("Keys: {actions}"))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(actions_widget, rows[0]);

    let mut status = ctx.status_message.to_string();
    if let Some(label) = focus_label(ctx) {
        status.push_str(" • focus: ");
        status.push_str(&label);
    }
    if status.trim().is_empty() {
        status = "Ready".to_string();
    }

    let total = ctx.form.store().total();
    let badge = if ctx.form.cursor().is_editing() {
        Span::styled("[editing]", Style::default().fg(Color::Yellow))
    } else if !ctx.invalid.is_empty() {
        Span::styled(
            format!("[! {}]", ctx.invalid.len()),
            Style::default().fg(Color::Red).bg(Color::Black),
        )
    } else {
        Span::styled(
            format!("[{total} entries]"),
            Style::default().fg(Color::Green),
        )
    };

    let status_widget = Paragraph::new(Line::from(vec![
        Span::raw("Status: "),
        Span::raw(status),
        Span::raw(" "),
        badge,
    ]));
    frame.render_widget(status_widget, rows[1]);
}

fn focus_label(ctx: &UiContext<'_>) -> Option<String> {
    match ctx.pane {
        Pane::Table => Some("submissions".to_string()),
        Pane::Form => match ctx.form_slot {
            FormSlot::TypeSelector => Some("form type".to_string()),
            FormSlot::Field(idx) => ctx
                .form
                .selection()
                .fields()
                .get(idx)
                .map(|field| field.label.clone()),
            FormSlot::SubmitButton => Some(ctx.form.submit_label().to_string()),
        },
    }
}
