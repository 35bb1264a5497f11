//! Navigation-related state types.
//!
//! This module contains enums related to focus and the prompts that capture
//! typed input.

/// Specifying the different foci.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Focus {
    Menu,
    View,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::Menu => Focus::View,
            Focus::View => Focus::Menu,
        }
    }
}

/// Specifying which input currently receives typed characters.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputMode {
    /// Keys are commands.
    Normal,
    /// Typing the bearer token on the login route.
    Token,
    /// Typing a search term for the active table.
    Search,
    /// Typing a path to navigate to.
    Goto,
    /// Typing into the open form dialog.
    Form,
    /// Editing a user's roles, permissions and modules.
    Access,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_toggle() {
        assert_eq!(Focus::Menu.toggled(), Focus::View);
        assert_eq!(Focus::View.toggled(), Focus::Menu);
    }
}
