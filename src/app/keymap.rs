use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use super::input::KeyAction;

macro_rules! keymap_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/keymap/default.keymap.json"
        ))
    };
}

/// Which pane owns the keyboard; bindings only fire in the contexts they list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum KeymapContext {
    Form,
    Table,
}

impl KeymapContext {
    fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "form" => Some(KeymapContext::Form),
            "table" => Some(KeymapContext::Table),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    id: String,
    description: String,
    contexts: Vec<String>,
    action: RawAction,
    combos: Vec<String>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawAction {
    Submit,
    Quit,
    SwitchPane,
    FocusStep { delta: i32 },
    Activate,
    EditRow,
    DeleteRow,
    ResetStatus,
}

impl RawAction {
    fn into_action(self) -> KeyAction {
        match self {
            RawAction::Submit => KeyAction::Submit,
            RawAction::Quit => KeyAction::Quit,
            RawAction::SwitchPane => KeyAction::SwitchPane,
            RawAction::FocusStep { delta } => KeyAction::FocusStep(delta),
            RawAction::Activate => KeyAction::Activate,
            RawAction::EditRow => KeyAction::EditRow,
            RawAction::DeleteRow => KeyAction::DeleteRow,
            RawAction::ResetStatus => KeyAction::ResetStatus,
        }
    }
}

#[derive(Debug)]
struct KeyBinding {
    action: KeyAction,
    contexts: Vec<KeymapContext>,
    combos: Vec<KeyPattern>,
    snippet: String,
}

impl KeyBinding {
    fn from_raw(raw: RawEntry) -> Result<Self> {
        let contexts = raw
            .contexts
            .iter()
            .filter_map(|ctx| KeymapContext::from_str(ctx))
            .collect::<Vec<_>>();
        if contexts.is_empty() {
            bail!("keymap entry {} must declare at least one known context", raw.id);
        }
        let combos = raw
            .combos
            .iter()
            .map(|combo| {
                KeyPattern::parse(combo)
                    .map_err(|err| anyhow!("failed to parse combo '{combo}' for {}: {err}", raw.id))
            })
            .collect::<Result<Vec<_>>>()?;
        if combos.is_empty() {
            bail!("keymap entry {} must declare combos", raw.id);
        }
        let combos_display = combos
            .iter()
            .map(|pattern| pattern.display.as_str())
            .collect::<Vec<_>>()
            .join("/");
        let snippet = format!("{combos_display} {}", raw.description);
        Ok(Self {
            action: raw.action.into_action(),
            contexts,
            combos,
            snippet,
        })
    }

    fn matches(&self, key: &KeyEvent, context: KeymapContext) -> Option<KeyAction> {
        if !self.contexts.contains(&context) {
            return None;
        }
        self.combos
            .iter()
            .find(|pattern| pattern.matches(key))
            .map(|_| self.action)
    }
}

#[derive(Debug)]
struct KeyPattern {
    matcher: CodeMatcher,
    required: KeyModifiers,
    allow_shift: bool,
    display: String,
}

impl KeyPattern {
    fn parse(spec: &str) -> Result<Self, String> {
        let display = spec.trim().to_string();
        if display.is_empty() {
            return Err("combo cannot be empty".into());
        }
        let mut tokens = display
            .split('+')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();
        let Some(key_token) = tokens.pop() else {
            return Err("combo must contain key".into());
        };
        let mut matcher = CodeMatcher::from_token(key_token)?;
        let mut required = KeyModifiers::empty();
        for token in tokens {
            match token.to_lowercase().as_str() {
                "ctrl" | "control" => required |= KeyModifiers::CONTROL,
                "shift" => required |= KeyModifiers::SHIFT,
                "alt" => required |= KeyModifiers::ALT,
                other => {
                    return Err(format!("unsupported modifier '{other}'"));
                }
            }
        }
        // Terminals report Shift+Tab as BackTab, with or without the shift bit.
        if matcher == CodeMatcher::Literal(KeyCode::Tab) && required.contains(KeyModifiers::SHIFT) {
            matcher = CodeMatcher::Literal(KeyCode::BackTab);
            required.remove(KeyModifiers::SHIFT);
        }
        let allow_shift = matcher.allows_extra_shift() && !required.contains(KeyModifiers::SHIFT);
        Ok(Self {
            matcher,
            required,
            allow_shift,
            display,
        })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        if !self.matcher.matches(&key.code) {
            return false;
        }
        if !key.modifiers.contains(self.required) {
            return false;
        }
        let extra = key.modifiers.difference(self.required);
        if self.allow_shift {
            (extra - KeyModifiers::SHIFT).is_empty()
        } else {
            extra.is_empty()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CodeMatcher {
    Literal(KeyCode),
    Alpha(char),
}

impl CodeMatcher {
    fn from_token(token: &str) -> Result<Self, String> {
        let normalized = token.to_lowercase();
        let matcher = match normalized.as_str() {
            "tab" => CodeMatcher::Literal(KeyCode::Tab),
            "backtab" => CodeMatcher::Literal(KeyCode::BackTab),
            "enter" => CodeMatcher::Literal(KeyCode::Enter),
            "esc" | "escape" => CodeMatcher::Literal(KeyCode::Esc),
            "delete" | "del" => CodeMatcher::Literal(KeyCode::Delete),
            "left" => CodeMatcher::Literal(KeyCode::Left),
            "right" => CodeMatcher::Literal(KeyCode::Right),
            "up" => CodeMatcher::Literal(KeyCode::Up),
            "down" => CodeMatcher::Literal(KeyCode::Down),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => CodeMatcher::Alpha(ch),
                    _ => return Err(format!("unsupported key '{token}'")),
                }
            }
        };
        Ok(matcher)
    }

    fn matches(&self, code: &KeyCode) -> bool {
        match (self, code) {
            (CodeMatcher::Literal(expected), actual) => actual == expected,
            (CodeMatcher::Alpha(expected), KeyCode::Char(actual)) => {
                actual.to_ascii_lowercase() == *expected
            }
            _ => false,
        }
    }

    fn allows_extra_shift(&self) -> bool {
        matches!(
            self,
            CodeMatcher::Alpha(_) | CodeMatcher::Literal(KeyCode::BackTab)
        )
    }
}

/// Parsed key bindings, looked up per [`KeymapContext`].
#[derive(Debug)]
pub(crate) struct KeymapStore {
    bindings: Vec<KeyBinding>,
}

impl KeymapStore {
    pub(crate) fn from_json(source: &str) -> Result<Self> {
        let raw_entries: Vec<RawEntry> =
            serde_json::from_str(source).context("keymap is not a valid binding list")?;
        let bindings = raw_entries
            .into_iter()
            .map(KeyBinding::from_raw)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bindings })
    }

    pub(crate) fn classify(&self, key: &KeyEvent, context: KeymapContext) -> Option<KeyAction> {
        self.bindings
            .iter()
            .find_map(|binding| binding.matches(key, context))
    }

    pub(crate) fn help_text(&self, context: KeymapContext) -> Option<String> {
        let snippets = self
            .bindings
            .iter()
            .filter(|binding| binding.contexts.contains(&context))
            .map(|binding| binding.snippet.as_str())
            .collect::<Vec<_>>();
        if snippets.is_empty() {
            None
        } else {
            Some(snippets.join(" • "))
        }
    }
}

static DEFAULT_STORE: LazyLock<Arc<KeymapStore>> = LazyLock::new(|| {
    Arc::new(KeymapStore::from_json(keymap_source!()).expect("invalid keymap/default.keymap.json"))
});

pub(crate) fn default_store() -> Arc<KeymapStore> {
    Arc::clone(&DEFAULT_STORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_keymap_parses() {
        let store = default_store();
        assert!(store.help_text(KeymapContext::Form).is_some());
        assert!(store.help_text(KeymapContext::Table).is_some());
    }

    #[test]
    fn ctrl_s_submits_from_both_panes() {
        let store = default_store();
        let ctrl_s = key(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            store.classify(&ctrl_s, KeymapContext::Form),
            Some(KeyAction::Submit)
        );
        assert_eq!(
            store.classify(&ctrl_s, KeymapContext::Table),
            Some(KeyAction::Submit)
        );
    }

    #[test]
    fn plain_letters_only_bind_in_table_context() {
        let store = default_store();
        let d = key(KeyCode::Char('d'), KeyModifiers::NONE);
        assert_eq!(store.classify(&d, KeymapContext::Form), None);
        assert_eq!(
            store.classify(&d, KeymapContext::Table),
            Some(KeyAction::DeleteRow)
        );
        let shifted_e = key(KeyCode::Char('E'), KeyModifiers::SHIFT);
        assert_eq!(
            store.classify(&shifted_e, KeymapContext::Table),
            Some(KeyAction::EditRow)
        );
    }

    #[test]
    fn enter_depends_on_context() {
        let store = default_store();
        let enter = key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            store.classify(&enter, KeymapContext::Form),
            Some(KeyAction::Activate)
        );
        assert_eq!(
            store.classify(&enter, KeymapContext::Table),
            Some(KeyAction::EditRow)
        );
    }

    #[test]
    fn shift_tab_steps_backwards() {
        let store = default_store();
        for modifiers in [KeyModifiers::SHIFT, KeyModifiers::NONE] {
            let back = key(KeyCode::BackTab, modifiers);
            assert_eq!(
                store.classify(&back, KeymapContext::Form),
                Some(KeyAction::FocusStep(-1))
            );
        }
    }

    #[test]
    fn ctrl_letters_do_not_leak_into_plain_bindings() {
        let store = default_store();
        let ctrl_d = key(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(store.classify(&ctrl_d, KeymapContext::Table), None);
    }

    #[test]
    fn unknown_modifier_is_rejected() {
        let source = r#"[{"id": "x", "description": "x", "contexts": ["form"],
            "action": {"kind": "quit"}, "combos": ["Hyper+Q"]}]"#;
        let err = KeymapStore::from_json(source).expect_err("Hyper is not a modifier");
        assert!(err.to_string().contains("Hyper+Q"));
    }
}
