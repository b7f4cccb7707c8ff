use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::keymap::{KeymapContext, KeymapStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Submit,
    Quit,
    SwitchPane,
    FocusStep(i32),
    Activate,
    EditRow,
    DeleteRow,
    ResetStatus,
}

/// What the focused text input should do with a key the keymap did not claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextEdit {
    Insert(char),
    Backspace,
    Clear,
}

pub(crate) struct InputRouter {
    keymap: Arc<KeymapStore>,
}

impl InputRouter {
    pub(crate) fn new(keymap: Arc<KeymapStore>) -> Self {
        Self { keymap }
    }

    pub(crate) fn classify(&self, key: &KeyEvent, context: KeymapContext) -> Option<KeyAction> {
        self.keymap.classify(key, context)
    }

    pub(crate) fn help_text(&self, context: KeymapContext) -> Option<String> {
        self.keymap.help_text(context)
    }
}

pub(crate) fn text_edit(key: &KeyEvent) -> Option<TextEdit> {
    if key.modifiers.intersects(KeyModifiers::ALT) {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('u') | KeyCode::Char('U') => Some(TextEdit::Clear),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(ch) => Some(TextEdit::Insert(ch)),
        KeyCode::Backspace => Some(TextEdit::Backspace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_characters_are_inserted() {
        let key = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(text_edit(&key), Some(TextEdit::Insert('A')));
    }

    #[test]
    fn ctrl_u_clears_the_input() {
        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(text_edit(&key), Some(TextEdit::Clear));
    }

    #[test]
    fn alt_chords_are_ignored() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(text_edit(&key), None);
    }
}
