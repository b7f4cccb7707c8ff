/// Blocking confirmation raised once per successful store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Submitted,
    Saved,
    Deleted,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Submitted => "Form submitted successfully!",
            Notice::Saved => "Changes saved successfully!",
            Notice::Deleted => "Entry deleted successfully!",
        }
    }
}
