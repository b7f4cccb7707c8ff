use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::focus::Pane,
    domain::FieldDescriptor,
    form::Record,
};

use super::super::view::UiContext;

const EMPTY_CELL: &str = "-";
const ACTIONS_HEADER: &str = "Actions";
const ACTIONS_CELL: &str = "[e]dit [d]elete";
const MAX_COLUMN_WIDTH: usize = 24;

pub fn render_tables(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let tables: Vec<(&str, &[Record])> = ctx.form.store().non_empty().collect();
    if tables.is_empty() {
        let placeholder = Paragraph::new("No entries submitted yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" Submissions ").borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    }

    let constraints = tables
        .iter()
        .map(|(_, records)| Constraint::Length(table_height(records.len())))
        .chain(std::iter::once(Constraint::Min(0)));
    let chunks = Layout::vertical(constraints).split(area);

    let editing = ctx.form.cursor().target();
    let mut offset = 0usize;
    for (slot, (form_type, records)) in tables.iter().enumerate() {
        let selected = (ctx.pane == Pane::Table)
            .then_some(ctx.table_row)
            .filter(|row| (offset..offset + records.len()).contains(row))
            .map(|row| row - offset);
        let edited_row = editing
            .filter(|(edited_type, _)| edited_type == form_type)
            .map(|(_, index)| index);
        let fields = ctx.catalog.fields(form_type).unwrap_or_default();
        render_table(
            frame,
            chunks[slot],
            form_type,
            fields,
            records,
            selected,
            edited_row,
        );
        offset += records.len();
    }
}

fn render_table(
    frame: &mut Frame<'_>,
    area: Rect,
    form_type: &str,
    fields: &[FieldDescriptor],
    records: &[Record],
    selected: Option<usize>,
    edited_row: Option<usize>,
) {
    let header = Row::new(
        fields
            .iter()
            .map(|field| field.label.as_str())
            .chain(std::iter::once(ACTIONS_HEADER))
            .map(Cell::from),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = records.iter().enumerate().map(|(index, record)| {
        let cells = fields
            .iter()
            .map(|field| Cell::from(cell_text(record, field).to_string()))
            .chain(std::iter::once(Cell::from(ACTIONS_CELL)));
        let row = Row::new(cells);
        if edited_row == Some(index) {
            row.style(Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC))
        } else {
            row
        }
    });

    let widths = column_widths(fields, records);
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .title(Line::from(format!(" {form_type} Submissions ")))
                .borders(Borders::ALL),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");

    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

/// Rows plus header and borders, saturating at the terminal coordinate range.
fn table_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(3)
}

/// Stored value for `field`, or `-` when it is missing or empty.
pub(crate) fn cell_text<'a>(record: &'a Record, field: &FieldDescriptor) -> &'a str {
    match record.get(&field.name) {
        Some(value) if !value.is_empty() => value,
        _ => EMPTY_CELL,
    }
}

fn column_widths(fields: &[FieldDescriptor], records: &[Record]) -> Vec<Constraint> {
    fields
        .iter()
        .map(|field| {
            let widest = records
                .iter()
                .map(|record| cell_text(record, field).width())
                .chain(std::iter::once(field.label.width()))
                .max()
                .unwrap_or(0);
            Constraint::Length(widest.min(MAX_COLUMN_WIDTH) as u16)
        })
        .chain(std::iter::once(Constraint::Length(ACTIONS_CELL.width() as u16)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldKind;

    #[test]
    fn missing_and_empty_values_render_as_dash() {
        let age = FieldDescriptor::new("age", FieldKind::Number, "Age");
        let mut record = Record::new();
        assert_eq!(cell_text(&record, &age), "-");
        record.insert("age".into(), String::new());
        assert_eq!(cell_text(&record, &age), "-");
        record.insert("age".into(), "36".into());
        assert_eq!(cell_text(&record, &age), "36");
    }

    #[test]
    fn table_height_saturates_on_huge_lists() {
        assert_eq!(table_height(2), 5);
        assert_eq!(table_height(65_533), u16::MAX);
        assert_eq!(table_height(1_000_000), u16::MAX);
    }

    #[test]
    fn columns_fit_widest_value() {
        let city = FieldDescriptor::new("city", FieldKind::Text, "City");
        let mut record = Record::new();
        record.insert("city".into(), "San Francisco".into());
        let widths = column_widths(std::slice::from_ref(&city), &[record]);
        assert_eq!(widths[0], Constraint::Length(13));
        assert_eq!(widths[1], Constraint::Length(ACTIONS_CELL.width() as u16));
    }
}
