mod actions;
mod error;
mod notice;
mod reducers;
mod state;
mod store;

pub use actions::FormCommand;
pub use error::{FormError, MissingField};
pub use notice::Notice;
pub use reducers::FormEngine;
pub use state::{Draft, EditCursor, FormState, Selection};
pub use store::{Record, SubmissionStore};
