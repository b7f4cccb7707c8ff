use crate::{
    domain::{FieldDescriptor, FormCatalog},
    presentation::{PLACEHOLDER, PopupRender},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PopupTarget {
    FormType,
    Field(String),
}

/// Choice list for the type selector and dropdown fields. Index 0 is the placeholder.
pub(crate) struct ChoicePopup {
    target: PopupTarget,
    title: String,
    options: Vec<String>,
    selected: usize,
}

impl ChoicePopup {
    pub(crate) fn for_form_types(catalog: &FormCatalog, current: Option<&str>) -> Self {
        Self::new(
            PopupTarget::FormType,
            "Select Form Type".to_string(),
            catalog.form_names().map(str::to_string),
            current.unwrap_or_default(),
        )
    }

    pub(crate) fn for_field(field: &FieldDescriptor, current: &str) -> Self {
        Self::new(
            PopupTarget::Field(field.name.clone()),
            field.label.clone(),
            field.options.iter().cloned(),
            current,
        )
    }

    fn new(
        target: PopupTarget,
        title: String,
        choices: impl Iterator<Item = String>,
        current: &str,
    ) -> Self {
        let options: Vec<String> = std::iter::once(PLACEHOLDER.to_string())
            .chain(choices)
            .collect();
        let selected = if current.is_empty() {
            0
        } else {
            options
                .iter()
                .skip(1)
                .position(|option| option == current)
                .map_or(0, |idx| idx + 1)
        };
        Self {
            target,
            title,
            options,
            selected,
        }
    }

    pub(crate) fn target(&self) -> &PopupTarget {
        &self.target
    }

    pub(crate) fn select_previous(&mut self) {
        if self.selected == 0 {
            self.selected = self.options.len().saturating_sub(1);
        } else {
            self.selected -= 1;
        }
    }

    pub(crate) fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.options.len().max(1);
    }

    /// `None` when the placeholder is highlighted.
    pub(crate) fn chosen(&self) -> Option<&str> {
        if self.selected == 0 {
            None
        } else {
            self.options.get(self.selected).map(String::as_str)
        }
    }

    pub(crate) fn as_render(&self) -> PopupRender<'_> {
        PopupRender {
            title: &self.title,
            options: &self.options,
            selected: self.selected,
        }
    }
}
