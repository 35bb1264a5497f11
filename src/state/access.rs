//! Editing state for a user's roles, permissions and modules.

use crate::auth::{AccessKind, ModuleKey, PermissionKey, RoleKey, UserAccess};
use std::collections::BTreeSet;

/// Houses the checklist dialog opened from the users screen.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessEditor {
    pub user_id: String,
    pub display_name: String,
    section: AccessKind,
    cursor: usize,
    roles: BTreeSet<RoleKey>,
    permissions: BTreeSet<PermissionKey>,
    modules: BTreeSet<ModuleKey>,
}

impl AccessEditor {
    pub fn new(access: &UserAccess) -> Self {
        AccessEditor {
            user_id: access.user_id.clone(),
            display_name: access.display_name.clone(),
            section: AccessKind::Roles,
            cursor: 0,
            roles: access.roles().clone(),
            permissions: access.permissions(),
            modules: access.modules().clone(),
        }
    }

    /// Reloads the checklists after the grant changed, keeping the cursor.
    ///
    pub fn refresh(&mut self, access: &UserAccess) {
        self.roles = access.roles().clone();
        self.permissions = access.permissions();
        self.modules = access.modules().clone();
    }

    pub fn section(&self) -> AccessKind {
        self.section
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn roles(&self) -> &BTreeSet<RoleKey> {
        &self.roles
    }

    pub fn permissions(&self) -> &BTreeSet<PermissionKey> {
        &self.permissions
    }

    pub fn modules(&self) -> &BTreeSet<ModuleKey> {
        &self.modules
    }

    /// Returns the permission needed to apply the current section.
    ///
    pub fn required_permission(&self) -> PermissionKey {
        match self.section {
            AccessKind::Roles => PermissionKey::ManageRoles,
            AccessKind::Permissions => PermissionKey::ManagePermissions,
            AccessKind::Modules => PermissionKey::ManageModules,
        }
    }

    pub fn next_section(&mut self) {
        self.section = match self.section {
            AccessKind::Roles => AccessKind::Permissions,
            AccessKind::Permissions => AccessKind::Modules,
            AccessKind::Modules => AccessKind::Roles,
        };
        self.cursor = 0;
    }

    /// Returns the label and checked flag of each option in the section.
    ///
    pub fn options(&self) -> Vec<(String, bool)> {
        match self.section {
            AccessKind::Roles => RoleKey::ALL
                .into_iter()
                .map(|role| (role.to_string(), self.roles.contains(&role)))
                .collect(),
            AccessKind::Permissions => PermissionKey::ALL
                .into_iter()
                .map(|key| (key.tag().to_owned(), self.permissions.contains(&key)))
                .collect(),
            AccessKind::Modules => ModuleKey::ALL
                .into_iter()
                .map(|key| (key.tag().to_owned(), self.modules.contains(&key)))
                .collect(),
        }
    }

    fn option_count(&self) -> usize {
        match self.section {
            AccessKind::Roles => RoleKey::ALL.len(),
            AccessKind::Permissions => PermissionKey::ALL.len(),
            AccessKind::Modules => ModuleKey::ALL.len(),
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.option_count() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Flips the option under the cursor.
    ///
    pub fn toggle(&mut self) {
        match self.section {
            AccessKind::Roles => flip(&mut self.roles, RoleKey::ALL[self.cursor]),
            AccessKind::Permissions => {
                flip(&mut self.permissions, PermissionKey::ALL[self.cursor])
            }
            AccessKind::Modules => flip(&mut self.modules, ModuleKey::ALL[self.cursor]),
        }
    }
}

fn flip<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}
