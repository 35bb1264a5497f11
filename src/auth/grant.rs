//! Per-user access grants.

use super::catalog::{ModuleKey, PermissionKey, RoleKey};
use std::collections::BTreeSet;

/// Where a user's permissions come from.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PermissionGrant {
    /// Union of the permissions of the user's roles.
    Derived,
    /// An explicit set replacing the role-derived one.
    Overridden(BTreeSet<PermissionKey>),
}

/// Roles, permissions and modules granted to one user.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserAccess {
    pub user_id: String,
    pub display_name: String,
    roles: BTreeSet<RoleKey>,
    grant: PermissionGrant,
    modules: BTreeSet<ModuleKey>,
}

impl UserAccess {
    /// Returns access derived from the roles, with the roles' default modules.
    ///
    pub fn from_roles(user_id: &str, display_name: &str, roles: BTreeSet<RoleKey>) -> Self {
        let modules = roles
            .iter()
            .flat_map(|role| ModuleKey::defaults_for(*role))
            .collect();
        UserAccess {
            user_id: user_id.to_owned(),
            display_name: display_name.to_owned(),
            roles,
            grant: PermissionGrant::Derived,
            modules,
        }
    }

    pub fn roles(&self) -> &BTreeSet<RoleKey> {
        &self.roles
    }

    pub fn grant(&self) -> &PermissionGrant {
        &self.grant
    }

    pub fn modules(&self) -> &BTreeSet<ModuleKey> {
        &self.modules
    }

    /// Returns the effective permission set.
    ///
    pub fn permissions(&self) -> BTreeSet<PermissionKey> {
        match &self.grant {
            PermissionGrant::Derived => self
                .roles
                .iter()
                .flat_map(|role| role.definition().permissions)
                .collect(),
            PermissionGrant::Overridden(permissions) => permissions.clone(),
        }
    }

    pub fn has_permission(&self, permission: PermissionKey) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn has_module(&self, module: ModuleKey) -> bool {
        self.modules.contains(&module)
    }

    /// Replaces the roles and resets permissions to the role-derived set.
    /// Returns whether an explicit override was discarded.
    ///
    pub fn set_roles(&mut self, roles: BTreeSet<RoleKey>) -> bool {
        let discarded = matches!(self.grant, PermissionGrant::Overridden(_));
        self.roles = roles;
        self.grant = PermissionGrant::Derived;
        discarded
    }

    /// Replaces the permissions with an explicit set.
    ///
    pub fn override_permissions(&mut self, permissions: BTreeSet<PermissionKey>) {
        self.grant = PermissionGrant::Overridden(permissions);
    }

    pub fn set_modules(&mut self, modules: BTreeSet<ModuleKey>) {
        self.modules = modules;
    }
}
