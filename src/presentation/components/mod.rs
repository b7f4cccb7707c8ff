mod footer;
mod form_panel;
mod layout;
mod modal;
mod popup;
mod table;

pub use footer::{render_footer, render_title};
pub use form_panel::render_form_panel;
pub use modal::render_modal;
pub use popup::render_popup;
pub use table::render_tables;
