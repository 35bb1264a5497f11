//! Modal dialog state for one collection.

/// Specifying which dialog is open. Only one can be open at a time.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Modal<T> {
    None,
    /// Create when `editing` is `None`, edit otherwise.
    Form { editing: Option<T> },
    DeleteConfirm(T),
    View(T),
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Modal::None
    }
}

impl<T> Modal<T> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }

    /// Returns the record being edited, if the form is in edit mode.
    ///
    pub fn editing(&self) -> Option<&T> {
        match self {
            Modal::Form { editing } => editing.as_ref(),
            _ => None,
        }
    }

    /// Returns the record targeted by the open dialog.
    ///
    pub fn target(&self) -> Option<&T> {
        match self {
            Modal::Form { editing } => editing.as_ref(),
            Modal::DeleteConfirm(record) | Modal::View(record) => Some(record),
            Modal::None => None,
        }
    }
}
