use std::collections::HashSet;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use crate::{
    domain::FormCatalog,
    form::{FormCommand, FormEngine, FormError, FormState, SubmissionStore},
    presentation::{self, ModalRender, UiContext},
};

use super::{
    focus::{FocusState, FormSlot, Pane, table_rows},
    input::{InputRouter, KeyAction, TextEdit, text_edit},
    keymap::KeymapContext,
    modal::Modal,
    options::UiOptions,
    popup::{ChoicePopup, PopupTarget},
    status::StatusLine,
    terminal::TerminalSession,
};

pub(crate) struct App {
    catalog: FormCatalog,
    form: FormState,
    options: UiOptions,
    title: String,
    status: StatusLine,
    focus: FocusState,
    popup: Option<ChoicePopup>,
    modal: Option<Modal>,
    invalid: HashSet<String>,
    router: InputRouter,
    exit_armed: bool,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(catalog: FormCatalog, options: UiOptions, title: String) -> Self {
        let router = InputRouter::new(options.keymap_store.clone());
        Self {
            catalog,
            form: FormState::new(),
            options,
            title,
            status: StatusLine::new(),
            focus: FocusState::default(),
            popup: None,
            modal: None,
            invalid: HashSet::new(),
            router,
            exit_armed: false,
            should_quit: false,
        }
    }

    pub(crate) fn run(&mut self) -> Result<()> {
        let mut terminal = TerminalSession::enter()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }
        Ok(())
    }

    pub(crate) fn into_store(self) -> SubmissionStore {
        self.form.into_store()
    }

    fn keymap_context(&self) -> KeymapContext {
        match self.focus.pane {
            Pane::Form => KeymapContext::Form,
            Pane::Table => KeymapContext::Table,
        }
    }

    fn field_count(&self) -> usize {
        self.form.selection().fields().len()
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.modal.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.modal = None;
            }
            return;
        }
        if self.popup.is_some() {
            self.handle_popup_key(key);
            return;
        }

        match self.router.classify(&key, self.keymap_context()) {
            Some(action) => {
                if action != KeyAction::Quit {
                    self.exit_armed = false;
                }
                self.handle_action(action);
            }
            None if self.focus.pane == Pane::Form => self.handle_field_input(&key),
            None => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.popup = None;
                self.status.ready();
            }
            KeyCode::Up | KeyCode::BackTab => popup.select_previous(),
            KeyCode::Down | KeyCode::Tab => popup.select_next(),
            KeyCode::Enter => {
                let chosen = popup.chosen().map(str::to_string);
                let target = popup.target().clone();
                self.popup = None;
                self.apply_choice(target, chosen);
            }
            _ => {}
        }
    }

    fn apply_choice(&mut self, target: PopupTarget, chosen: Option<String>) {
        match target {
            PopupTarget::FormType => {
                if chosen.as_deref() == self.form.selection().form_type() {
                    return;
                }
                self.dispatch(FormCommand::SelectType(chosen));
                self.invalid.clear();
                self.focus.focus_selector();
                self.status.form_selected(self.form.selection().form_type());
            }
            PopupTarget::Field(name) => {
                self.invalid.remove(&name);
                if let Some(field) = self.form.selection().field(&name) {
                    self.status.editing(&field.label);
                }
                self.dispatch(FormCommand::SetField {
                    name,
                    value: chosen.unwrap_or_default(),
                });
            }
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Submit => {
                self.dispatch(FormCommand::Submit);
            }
            KeyAction::Quit => self.on_exit(),
            KeyAction::SwitchPane => self.switch_pane(),
            KeyAction::FocusStep(delta) => self.step_focus(delta),
            KeyAction::Activate => self.activate(),
            KeyAction::EditRow => {
                let Some((form_type, index)) = self.selected_row() else {
                    return;
                };
                if self.dispatch(FormCommand::edit(form_type.clone(), index)) {
                    self.invalid.clear();
                    self.focus.focus_field(0);
                    self.status.editing_entry(&form_type, index);
                }
            }
            KeyAction::DeleteRow => {
                let Some((form_type, index)) = self.selected_row() else {
                    return;
                };
                self.dispatch(FormCommand::delete(form_type, index));
            }
            KeyAction::ResetStatus => self.status.ready(),
        }
    }

    fn switch_pane(&mut self) {
        match self.focus.pane {
            Pane::Form if table_rows(self.form.store()).is_empty() => self.status.no_entries(),
            Pane::Form => self.focus.pane = Pane::Table,
            Pane::Table => self.focus.pane = Pane::Form,
        }
    }

    fn activate(&mut self) {
        match self.focus.form_slot(self.field_count()) {
            FormSlot::TypeSelector => {
                self.popup = Some(ChoicePopup::for_form_types(
                    &self.catalog,
                    self.form.selection().form_type(),
                ));
            }
            FormSlot::Field(idx) => {
                let Some(field) = self.form.selection().fields().get(idx) else {
                    return;
                };
                if field.kind.is_choice() {
                    let current = self.form.draft().get(&field.name);
                    self.popup = Some(ChoicePopup::for_field(field, current));
                } else {
                    self.step_focus(1);
                }
            }
            FormSlot::SubmitButton => {
                self.dispatch(FormCommand::Submit);
            }
        }
    }

    fn step_focus(&mut self, delta: i32) {
        let fields = self.field_count();
        let rows = table_rows(self.form.store()).len();
        self.focus.step(delta, fields, rows);
    }

    fn clamp_focus(&mut self) {
        let fields = self.field_count();
        let rows = table_rows(self.form.store()).len();
        self.focus.clamp(fields, rows);
    }

    fn selected_row(&self) -> Option<(String, usize)> {
        if self.focus.pane != Pane::Table {
            return None;
        }
        table_rows(self.form.store())
            .into_iter()
            .nth(self.focus.table_row())
    }

    fn handle_field_input(&mut self, key: &KeyEvent) {
        let FormSlot::Field(idx) = self.focus.form_slot(self.field_count()) else {
            return;
        };
        let Some(field) = self.form.selection().fields().get(idx) else {
            return;
        };
        if field.kind.is_choice() {
            return;
        }
        let Some(edit) = text_edit(key) else {
            return;
        };
        let current = self.form.draft().get(&field.name);
        let value = match edit {
            TextEdit::Insert(ch) if field.kind.accepts(ch, current) => {
                let mut value = current.to_string();
                value.push(ch);
                value
            }
            TextEdit::Insert(_) => return,
            TextEdit::Backspace if current.is_empty() => return,
            TextEdit::Backspace => {
                let mut value = current.to_string();
                value.pop();
                value
            }
            TextEdit::Clear => String::new(),
        };
        let name = field.name.clone();
        self.status.editing(&field.label);
        self.exit_armed = false;
        self.invalid.remove(&name);
        self.dispatch(FormCommand::SetField { name, value });
    }

    /// Runs one command through the engine and reflects the outcome in the UI.
    /// Returns whether the command succeeded.
    fn dispatch(&mut self, command: FormCommand) -> bool {
        let result = FormEngine::new(&mut self.form, &self.catalog).dispatch(command);
        match result {
            Ok(Some(notice)) => {
                self.invalid.clear();
                self.status.set_raw(notice.message());
                self.modal = Some(Modal::Notice(notice));
                self.clamp_focus();
                true
            }
            Ok(None) => {
                self.clamp_focus();
                true
            }
            Err(FormError::MissingRequired { fields, .. }) => {
                self.invalid = fields.iter().map(|field| field.name.clone()).collect();
                if let Some(first) = fields.first()
                    && let Some(idx) = self
                        .form
                        .selection()
                        .fields()
                        .iter()
                        .position(|field| field.name == first.name)
                {
                    self.focus.focus_field(idx);
                }
                self.status.refused(fields.len());
                self.modal = Some(Modal::MissingFields(fields));
                false
            }
            Err(err) => {
                debug!(error = %err, "command rejected");
                self.status.set_raw(err.to_string());
                self.modal = Some(Modal::Error(err.to_string()));
                false
            }
        }
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && !self.form.draft().is_empty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let help = self
            .options
            .show_help
            .then(|| self.router.help_text(self.keymap_context()))
            .flatten();
        let modal = self.modal.as_ref().map(|modal| ModalRender {
            title: modal.title(),
            body: modal.body(),
            success: modal.is_success(),
        });
        let ctx = UiContext {
            title: &self.title,
            catalog: &self.catalog,
            form: &self.form,
            pane: self.focus.pane,
            form_slot: self.focus.form_slot(self.field_count()),
            table_row: self.focus.table_row(),
            invalid: &self.invalid,
            mask_passwords: self.options.mask_passwords,
            status_message: self.status.message(),
            help: help.as_deref(),
            popup: self.popup.as_ref().map(ChoicePopup::as_render),
            modal,
        };
        presentation::draw(frame, &ctx);
    }
}
