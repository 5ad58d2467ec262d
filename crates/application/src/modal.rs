/// Which modal is active for one entity collection.
///
/// A single tagged value instead of independent booleans, so combinations
/// like "view and edit both open" are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState<T> {
    /// No modal is open; the list is in front.
    Closed,
    /// The create screen is open with a fresh form.
    Creating,
    /// The read-only view screen shows this record.
    Viewing(T),
    /// The edit screen holds a form seeded from this record.
    Editing(T),
    /// A delete is awaiting confirmation for this record.
    ConfirmingDelete(T),
}

impl<T> ModalState<T> {
    /// Returns whether no modal is open.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns the record bound to the active modal, if any.
    #[must_use]
    pub fn record(&self) -> Option<&T> {
        match self {
            Self::Closed | Self::Creating => None,
            Self::Viewing(record) | Self::Editing(record) | Self::ConfirmingDelete(record) => {
                Some(record)
            }
        }
    }
}
