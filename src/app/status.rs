#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Pick a form type, fill it in and press Ctrl+S to submit.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn form_selected(&mut self, form_type: Option<&str>) {
        self.message = match form_type {
            Some(name) => format!("Filling in {name}"),
            None => "No form type selected".to_string(),
        };
    }

    pub fn editing_entry(&mut self, form_type: &str, index: usize) {
        self.message = format!("Editing {form_type} entry {}", index + 1);
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn refused(&mut self, missing: usize) {
        self.message = format!("{missing} required field(s) empty");
    }

    pub fn no_entries(&mut self) {
        self.message = "No entries submitted yet".to_string();
    }

    pub fn pending_exit(&mut self) {
        self.message = "Unsaved draft. Press Ctrl+Q again to quit anyway.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
