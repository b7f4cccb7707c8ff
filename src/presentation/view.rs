use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    app::focus::{FormSlot, Pane},
    domain::FormCatalog,
    form::FormState,
};

use super::components::{
    render_footer, render_form_panel, render_modal, render_popup, render_tables, render_title,
};

/// Label of the empty choice in the type selector and in dropdowns.
pub const PLACEHOLDER: &str = "-- Select --";

pub struct UiContext<'a> {
    pub title: &'a str,
    pub catalog: &'a FormCatalog,
    pub form: &'a FormState,
    pub pane: Pane,
    pub form_slot: FormSlot,
    pub table_row: usize,
    pub invalid: &'a HashSet<String>,
    pub mask_passwords: bool,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    pub popup: Option<PopupRender<'a>>,
    pub modal: Option<ModalRender<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct PopupRender<'a> {
    pub title: &'a str,
    pub options: &'a [String],
    pub selected: usize,
}

#[derive(Debug, Clone)]
pub struct ModalRender<'a> {
    pub title: &'a str,
    pub body: String,
    pub success: bool,
}

pub fn draw(frame: &mut Frame<'_>, ctx: &UiContext<'_>) {
    let field_count = ctx.form.selection().fields().len();
    let form_rows = if field_count == 0 { 1 } else { field_count + 2 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(form_rows as u16 + 2),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(frame.area());

    render_title(frame, chunks[0], ctx);
    render_form_panel(frame, chunks[1], ctx);
    render_tables(frame, chunks[2], ctx);
    render_footer(frame, chunks[3], ctx);

    if let Some(popup) = ctx.popup {
        render_popup(frame, popup);
    }
    if let Some(modal) = &ctx.modal {
        render_modal(frame, modal);
    }
}
