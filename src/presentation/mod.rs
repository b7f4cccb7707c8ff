mod components;
mod view;

pub use view::{ModalRender, PLACEHOLDER, PopupRender, UiContext, draw};
