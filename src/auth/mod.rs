//! Client-side authorization context.
//!
//! Holds the role/permission/module catalogs and the resolved grants of the
//! signed-in operator and of every user whose access was loaded or edited.
//! Gating here only decides which actions the console offers; the gateway
//! must authorize every request on its own.

pub mod catalog;
mod grant;

pub use catalog::{ModuleKey, PermissionKey, RoleDefinition, RoleKey};
pub use grant::{PermissionGrant, UserAccess};

use crate::entity::User;
use crate::router::Route;
use log::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Specifying the actions a screen can offer.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Edit,
    Delete,
    View,
    ManageAccess,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::View,
        Action::ManageAccess,
    ];

    /// Returns the permission that gates the action.
    ///
    pub fn required_permission(self) -> PermissionKey {
        match self {
            Action::Create => PermissionKey::Create,
            Action::Edit => PermissionKey::Update,
            Action::Delete => PermissionKey::Delete,
            Action::View => PermissionKey::Read,
            Action::ManageAccess => PermissionKey::ManageRoles,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Create => "create records",
            Action::Edit => "edit records",
            Action::Delete => "delete records",
            Action::View => "view records",
            Action::ManageAccess => "manage user access",
        })
    }
}

/// Raised when an action is attempted without its permission.
///
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("You do not have permission to {0}")]
pub struct PermissionDenied(pub Action);

/// Which part of a user's access an update replaced.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    Roles,
    Permissions,
    Modules,
}

/// Result of a local access update, carried to the gateway.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessUpdate {
    pub user_id: String,
    pub kind: AccessKind,
    pub tags: Vec<String>,
    pub discarded_override: bool,
}

/// Process-wide authorization state for one signed-in session.
///
#[derive(Debug, Default)]
pub struct AuthContext {
    current_user_id: Option<String>,
    users: BTreeMap<String, UserAccess>,
    locally_edited: BTreeSet<String>,
}

impl AuthContext {
    pub fn new() -> Self {
        AuthContext::default()
    }

    /// Installs the signed-in operator.
    ///
    pub fn sign_in(&mut self, access: UserAccess) {
        info!(
            "Signed in as '{}' with roles [{}]",
            access.display_name,
            access
                .roles()
                .iter()
                .map(|role| role.tag())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.current_user_id = Some(access.user_id.clone());
        self.users.insert(access.user_id.clone(), access);
    }

    /// Drops every cached grant.
    ///
    pub fn clear(&mut self) {
        debug!("Clearing authorization context...");
        self.current_user_id = None;
        self.users.clear();
        self.locally_edited.clear();
    }

    pub fn is_signed_in(&self) -> bool {
        self.current().is_some()
    }

    pub fn current(&self) -> Option<&UserAccess> {
        self.current_user_id
            .as_ref()
            .and_then(|id| self.users.get(id))
    }

    pub fn user(&self, user_id: &str) -> Option<&UserAccess> {
        self.users.get(user_id)
    }

    /// Returns whether the signed-in operator holds the permission.
    ///
    pub fn has_permission(&self, permission: PermissionKey) -> bool {
        self.current()
            .map_or(false, |access| access.has_permission(permission))
    }

    pub fn has_module(&self, module: ModuleKey) -> bool {
        self.current().map_or(false, |access| access.has_module(module))
    }

    /// Returns whether the route is visible to the operator. Routes without a
    /// module are always visible.
    ///
    pub fn can_access(&self, route: &Route) -> bool {
        route.module().map_or(true, |module| self.has_module(module))
    }

    /// Checks an action before any dialog opens.
    ///
    pub fn authorize(&self, action: Action) -> Result<(), PermissionDenied> {
        if self.has_permission(action.required_permission()) {
            Ok(())
        } else {
            Err(PermissionDenied(action))
        }
    }

    /// Returns the subset of candidate actions the operator may perform.
    ///
    pub fn available_actions(&self, candidates: &[Action]) -> Vec<Action> {
        candidates
            .iter()
            .copied()
            .filter(|action| self.authorize(*action).is_ok())
            .collect()
    }

    /// Seeds role-derived access for fetched users and re-derives it when the
    /// fetched roles changed. Access already edited in this session is kept.
    ///
    pub fn sync_users(&mut self, users: &[User]) {
        for user in users {
            if self.locally_edited.contains(&user.id) {
                continue;
            }
            let roles = catalog::parse_roles(&user.roles);
            let stale = self
                .users
                .get(&user.id)
                .map_or(true, |access| *access.roles() != roles);
            if stale {
                debug!("Deriving access for user {} from fetched roles", user.id);
                self.users.insert(
                    user.id.clone(),
                    UserAccess::from_roles(&user.id, &user.username, roles),
                );
            }
        }
    }

    fn access_mut(&mut self, user_id: &str) -> &mut UserAccess {
        self.locally_edited.insert(user_id.to_owned());
        self.users
            .entry(user_id.to_owned())
            .or_insert_with(|| UserAccess::from_roles(user_id, user_id, BTreeSet::new()))
    }

    /// Replaces a user's roles and resets their permissions to the derived
    /// set.
    ///
    pub fn update_user_roles(&mut self, user_id: &str, roles: BTreeSet<RoleKey>) -> AccessUpdate {
        let tags = roles.iter().map(|role| role.tag().to_owned()).collect();
        let discarded_override = self.access_mut(user_id).set_roles(roles);
        if discarded_override {
            warn!(
                "Role change for user {} discarded an explicit permission override",
                user_id
            );
        }
        AccessUpdate {
            user_id: user_id.to_owned(),
            kind: AccessKind::Roles,
            tags,
            discarded_override,
        }
    }

    /// Replaces a user's permissions with an explicit set.
    ///
    pub fn update_user_permissions(
        &mut self,
        user_id: &str,
        permissions: BTreeSet<PermissionKey>,
    ) -> AccessUpdate {
        let tags = permissions.iter().map(|p| p.tag().to_owned()).collect();
        self.access_mut(user_id).override_permissions(permissions);
        AccessUpdate {
            user_id: user_id.to_owned(),
            kind: AccessKind::Permissions,
            tags,
            discarded_override: false,
        }
    }

    /// Replaces the modules a user can reach.
    ///
    pub fn update_user_modules(
        &mut self,
        user_id: &str,
        modules: BTreeSet<ModuleKey>,
    ) -> AccessUpdate {
        let tags = modules.iter().map(|m| m.tag().to_owned()).collect();
        self.access_mut(user_id).set_modules(modules);
        AccessUpdate {
            user_id: user_id.to_owned(),
            kind: AccessKind::Modules,
            tags,
            discarded_override: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Status;

    fn signed_in(roles: &[RoleKey]) -> AuthContext {
        let mut auth = AuthContext::new();
        auth.sign_in(UserAccess::from_roles(
            "me",
            "operator",
            roles.iter().copied().collect(),
        ));
        auth
    }

    #[test]
    fn test_signed_out_has_nothing() {
        let auth = AuthContext::new();
        assert!(!auth.is_signed_in());
        assert!(!auth.has_permission(PermissionKey::Read));
        assert!(auth.available_actions(&Action::ALL).is_empty());
    }

    #[test]
    fn test_delete_hidden_without_permission() {
        let auth = signed_in(&[RoleKey::HrManager]);
        assert!(!auth.has_permission(PermissionKey::Delete));
        let actions = auth.available_actions(&Action::ALL);
        assert!(!actions.contains(&Action::Delete));
        assert!(actions.contains(&Action::Create));
        assert_eq!(
            auth.authorize(Action::Delete),
            Err(PermissionDenied(Action::Delete))
        );
    }

    #[test]
    fn test_denied_message() {
        assert_eq!(
            PermissionDenied(Action::Delete).to_string(),
            "You do not have permission to delete records"
        );
    }

    #[test]
    fn test_updating_own_roles_changes_gating() {
        let mut auth = signed_in(&[RoleKey::Employee]);
        assert!(!auth.has_permission(PermissionKey::Delete));
        let update = auth.update_user_roles("me", [RoleKey::Admin].into_iter().collect());
        assert_eq!(update.kind, AccessKind::Roles);
        assert_eq!(update.tags, vec!["admin"]);
        assert!(auth.has_permission(PermissionKey::Delete));
    }

    #[test]
    fn test_role_update_discards_override() {
        let mut auth = signed_in(&[RoleKey::Employee]);
        auth.update_user_permissions("me", [PermissionKey::Delete].into_iter().collect());
        assert!(auth.has_permission(PermissionKey::Delete));
        assert!(!auth.has_permission(PermissionKey::Read));
        let update = auth.update_user_roles("me", [RoleKey::Employee].into_iter().collect());
        assert!(update.discarded_override);
        assert!(!auth.has_permission(PermissionKey::Delete));
        assert!(auth.has_permission(PermissionKey::Read));
    }

    #[test]
    fn test_update_modules() {
        let mut auth = signed_in(&[RoleKey::Employee]);
        assert!(!auth.has_module(ModuleKey::Geography));
        let update = auth.update_user_modules("me", [ModuleKey::Geography].into_iter().collect());
        assert_eq!(update.tags, vec!["geography"]);
        assert!(auth.has_module(ModuleKey::Geography));
        assert!(!auth.has_module(ModuleKey::Dashboard));
    }

    #[test]
    fn test_can_access_by_module() {
        use crate::entity::EntityKind;
        let auth = signed_in(&[RoleKey::Manager]);
        assert!(auth.can_access(&Route::Dashboard));
        assert!(auth.can_access(&Route::Departments));
        assert!(!auth.can_access(&Route::Entity(EntityKind::Country)));
        assert!(auth.can_access(&Route::NotFound("/x".to_string())));
    }

    #[test]
    fn test_sync_users_keeps_edited_access() {
        let mut auth = signed_in(&[RoleKey::Admin]);
        auth.update_user_roles("7", [RoleKey::Manager].into_iter().collect());
        let users = vec![
            User {
                id: "7".to_string(),
                username: "grace".to_string(),
                full_name: "Grace Hopper".to_string(),
                email: "grace@example.com".to_string(),
                roles: vec!["employee".to_string()],
                status: Status::Active,
                created_at: None,
                updated_at: None,
            },
            User {
                id: "8".to_string(),
                username: "alan".to_string(),
                full_name: "Alan Turing".to_string(),
                email: "alan@example.com".to_string(),
                roles: vec!["hr_manager".to_string()],
                status: Status::Active,
                created_at: None,
                updated_at: None,
            },
        ];
        auth.sync_users(&users);
        assert!(auth.user("7").unwrap().roles().contains(&RoleKey::Manager));
        assert!(auth.user("8").unwrap().roles().contains(&RoleKey::HrManager));
    }

    #[test]
    fn test_sync_users_follows_fetched_role_changes() {
        let mut auth = signed_in(&[RoleKey::Admin]);
        let mut grace = User {
            id: "7".to_string(),
            username: "grace".to_string(),
            full_name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            roles: vec!["employee".to_string()],
            status: Status::Active,
            created_at: None,
            updated_at: None,
        };
        auth.sync_users(std::slice::from_ref(&grace));
        assert!(!auth.user("7").unwrap().has_permission(PermissionKey::Delete));

        grace.roles = vec!["admin".to_string()];
        auth.sync_users(std::slice::from_ref(&grace));
        let access = auth.user("7").unwrap();
        assert_eq!(access.roles(), &[RoleKey::Admin].into_iter().collect());
        assert!(access.has_permission(PermissionKey::Delete));
        assert!(access.has_module(ModuleKey::Geography));
    }

    #[test]
    fn test_clear_tears_down_session() {
        let mut auth = signed_in(&[RoleKey::SuperAdmin]);
        auth.clear();
        assert!(!auth.is_signed_in());
        assert!(auth.user("me").is_none());
    }
}
