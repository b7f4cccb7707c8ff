use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::focus::{FormSlot, Pane},
    domain::{FieldDescriptor, FieldKind},
};

use super::super::view::{PLACEHOLDER, UiContext};

const SELECTOR_LABEL: &str = "Select Form Type";
const HIGHLIGHT_SYMBOL: &str = "» ";
const MASK: char = '•';

pub fn render_form_panel(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let selection = ctx.form.selection();
    let focused = (ctx.pane == Pane::Form).then_some(ctx.form_slot);
    let label_width = selection
        .fields()
        .iter()
        .map(|field| field.display_label().width())
        .chain(std::iter::once(SELECTOR_LABEL.width()))
        .max()
        .unwrap_or(0);

    let mut items = Vec::with_capacity(selection.fields().len() + 2);
    let mut cursor_column: Option<(usize, usize)> = None;

    let selector_value = selection.form_type().unwrap_or(PLACEHOLDER);
    items.push(ListItem::new(Line::from(vec![
        label_span(SELECTOR_LABEL, label_width, focused == Some(FormSlot::TypeSelector), false),
        Span::raw(format!("{selector_value} ▾")),
    ])));

    for (idx, field) in selection.fields().iter().enumerate() {
        let is_focused = focused == Some(FormSlot::Field(idx));
        let invalid = ctx.invalid.contains(&field.name);
        let shown = display_value(field, ctx.form.draft().get(&field.name), ctx.mask_passwords);
        let mut spans = vec![
            label_span(&field.display_label(), label_width, is_focused, invalid),
            Span::raw(shown.clone()),
        ];
        if invalid {
            spans.push(Span::styled(
                "  required",
                Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
            ));
        }
        if is_focused && !field.kind.is_choice() {
            cursor_column = Some((idx + 1, label_width + 2 + shown.width()));
        }
        items.push(ListItem::new(Line::from(spans)));
    }

    if !selection.fields().is_empty() {
        let style = if focused == Some(FormSlot::SubmitButton) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        items.push(ListItem::new(Line::from(Span::styled(
            format!("[ {} ]", ctx.form.submit_label()),
            style,
        ))));
    }

    let title = match ctx.form.cursor().target() {
        Some((form_type, index)) => format!(" Editing {form_type} entry {} ", index + 1),
        None => " Form ".to_string(),
    };
    let border_style = if ctx.pane == Pane::Form {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut state = ListState::default();
    state.select(focused.map(|slot| slot_index(slot, selection.fields().len())));
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(list, area, &mut state);

    if ctx.popup.is_some() || ctx.modal.is_some() {
        return;
    }
    if let Some((line, column)) = cursor_column {
        let inner_bottom = area.bottom().saturating_sub(2);
        let y = area.y.saturating_add(1).saturating_add(line as u16).min(inner_bottom);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(HIGHLIGHT_SYMBOL.width() as u16)
            .saturating_add(column as u16)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, y));
    }
}

fn slot_index(slot: FormSlot, field_count: usize) -> usize {
    match slot {
        FormSlot::TypeSelector => 0,
        FormSlot::Field(idx) => idx + 1,
        FormSlot::SubmitButton => field_count + 1,
    }
}

fn label_span(label: &str, width: usize, focused: bool, invalid: bool) -> Span<'static> {
    let padding = width.saturating_sub(label.width());
    let text = format!("{label}{}: ", " ".repeat(padding));
    let style = if invalid {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Span::styled(text, style)
}

/// What a field shows in the form for the current draft value.
pub(crate) fn display_value(field: &FieldDescriptor, raw: &str, mask_passwords: bool) -> String {
    match field.kind {
        FieldKind::Dropdown if raw.is_empty() => format!("{PLACEHOLDER} ▾"),
        FieldKind::Dropdown => format!("{raw} ▾"),
        FieldKind::Password if mask_passwords => MASK.to_string().repeat(raw.chars().count()),
        _ => raw.to_string(),
    }
}
