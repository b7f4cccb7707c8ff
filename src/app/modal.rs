use crate::form::{MissingField, Notice};

/// Blocking message; every other key waits until it is acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Modal {
    Notice(Notice),
    MissingFields(Vec<MissingField>),
    Error(String),
}

impl Modal {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            Modal::Notice(_) => "Done",
            Modal::MissingFields(_) => "Required fields",
            Modal::Error(_) => "Error",
        }
    }

    pub(crate) fn body(&self) -> String {
        match self {
            Modal::Notice(notice) => notice.message().to_string(),
            Modal::MissingFields(fields) => {
                let mut body = String::from("Please fill in:");
                for field in fields {
                    body.push_str("\n  • ");
                    body.push_str(&field.label);
                }
                body
            }
            Modal::Error(message) => message.clone(),
        }
    }

    pub(crate) fn is_success(&self) -> bool {
        matches!(self, Modal::Notice(_))
    }
}
