//! State management-specific error types.

use crate::auth::PermissionDenied;

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No operator session is active
    #[error("Not signed in")]
    NotSignedIn,

    /// The active route has no entity table
    #[error("No table on route {route}")]
    NoScreen { route: String },

    /// The operator lacks the permission for an action
    #[error(transparent)]
    PermissionDenied(#[from] PermissionDenied),

    /// The network worker is gone
    #[error("Network channel closed: {0}")]
    ChannelClosed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Action;

    #[test]
    fn test_state_error_display() {
        assert_eq!(StateError::NotSignedIn.to_string(), "Not signed in");

        let error = StateError::NoScreen {
            route: "/dashboard".to_string(),
        };
        assert!(error.to_string().contains("/dashboard"));

        let error: StateError = PermissionDenied(Action::Create).into();
        assert_eq!(
            error.to_string(),
            "You do not have permission to create records"
        );

        let error = StateError::ChannelClosed("receiver dropped".to_string());
        assert!(error.to_string().contains("receiver dropped"));
    }
}
