pub(crate) mod focus;
pub(crate) mod input;
pub(crate) mod keymap;
mod dynamic_form;
mod modal;
mod options;
mod popup;
mod runtime;
mod status;
mod terminal;

pub use dynamic_form::DynamicForm;
pub use options::UiOptions;
