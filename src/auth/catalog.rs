//! Fixed role, permission and module catalogs.

use std::collections::BTreeSet;
use std::fmt;

/// Specifying the permissions understood by the console.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PermissionKey {
    Create,
    Read,
    Update,
    Delete,
    ManageRoles,
    ManagePermissions,
    ManageModules,
    ViewReports,
}

impl PermissionKey {
    pub const ALL: [PermissionKey; 8] = [
        PermissionKey::Create,
        PermissionKey::Read,
        PermissionKey::Update,
        PermissionKey::Delete,
        PermissionKey::ManageRoles,
        PermissionKey::ManagePermissions,
        PermissionKey::ManageModules,
        PermissionKey::ViewReports,
    ];

    /// Returns the stable tag used in grants and on the wire.
    ///
    pub fn tag(self) -> &'static str {
        match self {
            PermissionKey::Create => "create",
            PermissionKey::Read => "read",
            PermissionKey::Update => "update",
            PermissionKey::Delete => "delete",
            PermissionKey::ManageRoles => "manage_roles",
            PermissionKey::ManagePermissions => "manage_permissions",
            PermissionKey::ManageModules => "manage_modules",
            PermissionKey::ViewReports => "view_reports",
        }
    }

    pub fn from_tag(tag: &str) -> Option<PermissionKey> {
        PermissionKey::ALL
            .into_iter()
            .find(|key| key.tag() == tag.trim().to_lowercase())
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Specifying the roles understood by the console.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoleKey {
    SuperAdmin,
    Admin,
    HrManager,
    Manager,
    Employee,
}

/// Display name, permissions and badge colour of a role.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleDefinition {
    pub display_name: &'static str,
    pub permissions: BTreeSet<PermissionKey>,
    pub color: &'static str,
}

impl RoleKey {
    pub const ALL: [RoleKey; 5] = [
        RoleKey::SuperAdmin,
        RoleKey::Admin,
        RoleKey::HrManager,
        RoleKey::Manager,
        RoleKey::Employee,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            RoleKey::SuperAdmin => "super_admin",
            RoleKey::Admin => "admin",
            RoleKey::HrManager => "hr_manager",
            RoleKey::Manager => "manager",
            RoleKey::Employee => "employee",
        }
    }

    /// Parses a role from its tag or display name.
    ///
    pub fn from_tag(tag: &str) -> Option<RoleKey> {
        let normalized = tag.trim().to_lowercase().replace([' ', '-'], "_");
        RoleKey::ALL.into_iter().find(|key| key.tag() == normalized)
    }

    /// Returns the catalog entry for the role.
    ///
    pub fn definition(self) -> RoleDefinition {
        use PermissionKey::*;
        let (display_name, permissions, color) = match self {
            RoleKey::SuperAdmin => ("Super Admin", PermissionKey::ALL.to_vec(), "red"),
            RoleKey::Admin => (
                "Admin",
                vec![
                    Create,
                    Read,
                    Update,
                    Delete,
                    ManageRoles,
                    ManagePermissions,
                    ViewReports,
                ],
                "purple",
            ),
            RoleKey::HrManager => ("HR Manager", vec![Create, Read, Update, ViewReports], "blue"),
            RoleKey::Manager => ("Manager", vec![Read, Update, ViewReports], "green"),
            RoleKey::Employee => ("Employee", vec![Read], "gray"),
        };
        RoleDefinition {
            display_name,
            permissions: permissions.into_iter().collect(),
            color,
        }
    }
}

impl fmt::Display for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition().display_name)
    }
}

/// Specifying the console modules a user can be granted.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleKey {
    Dashboard,
    Employees,
    UserManagement,
    AccessControl,
    Geography,
    Departments,
    Settings,
}

impl ModuleKey {
    pub const ALL: [ModuleKey; 7] = [
        ModuleKey::Dashboard,
        ModuleKey::Employees,
        ModuleKey::UserManagement,
        ModuleKey::AccessControl,
        ModuleKey::Geography,
        ModuleKey::Departments,
        ModuleKey::Settings,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ModuleKey::Dashboard => "dashboard",
            ModuleKey::Employees => "employees",
            ModuleKey::UserManagement => "user_management",
            ModuleKey::AccessControl => "access_control",
            ModuleKey::Geography => "geography",
            ModuleKey::Departments => "departments",
            ModuleKey::Settings => "settings",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ModuleKey> {
        let normalized = tag.trim().to_lowercase().replace([' ', '-'], "_");
        ModuleKey::ALL.into_iter().find(|key| key.tag() == normalized)
    }

    /// Returns the modules a role grants by default.
    ///
    pub fn defaults_for(role: RoleKey) -> BTreeSet<ModuleKey> {
        use ModuleKey::*;
        let modules = match role {
            RoleKey::SuperAdmin | RoleKey::Admin => ModuleKey::ALL.to_vec(),
            RoleKey::HrManager => vec![Dashboard, Employees, UserManagement, Geography, Departments],
            RoleKey::Manager => vec![Dashboard, Employees, Departments],
            RoleKey::Employee => vec![Dashboard, Employees],
        };
        modules.into_iter().collect()
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Parses role tags, logging and skipping unknown ones.
///
pub fn parse_roles<S: AsRef<str>>(tags: &[S]) -> BTreeSet<RoleKey> {
    tags.iter()
        .filter_map(|tag| {
            let parsed = RoleKey::from_tag(tag.as_ref());
            if parsed.is_none() {
                log::warn!("Ignoring unknown role '{}'", tag.as_ref());
            }
            parsed
        })
        .collect()
}

/// Parses permission tags, logging and skipping unknown ones.
///
pub fn parse_permissions<S: AsRef<str>>(tags: &[S]) -> BTreeSet<PermissionKey> {
    tags.iter()
        .filter_map(|tag| {
            let parsed = PermissionKey::from_tag(tag.as_ref());
            if parsed.is_none() {
                log::warn!("Ignoring unknown permission '{}'", tag.as_ref());
            }
            parsed
        })
        .collect()
}

/// Parses module tags, logging and skipping unknown ones.
///
pub fn parse_modules<S: AsRef<str>>(tags: &[S]) -> BTreeSet<ModuleKey> {
    tags.iter()
        .filter_map(|tag| {
            let parsed = ModuleKey::from_tag(tag.as_ref());
            if parsed.is_none() {
                log::warn!("Ignoring unknown module '{}'", tag.as_ref());
            }
            parsed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for key in PermissionKey::ALL {
            assert_eq!(PermissionKey::from_tag(key.tag()), Some(key));
        }
        for key in RoleKey::ALL {
            assert_eq!(RoleKey::from_tag(key.tag()), Some(key));
        }
        for key in ModuleKey::ALL {
            assert_eq!(ModuleKey::from_tag(key.tag()), Some(key));
        }
    }

    #[test]
    fn test_role_from_display_name() {
        assert_eq!(RoleKey::from_tag("HR Manager"), Some(RoleKey::HrManager));
        assert_eq!(RoleKey::from_tag("super-admin"), Some(RoleKey::SuperAdmin));
        assert_eq!(RoleKey::from_tag("intern"), None);
    }

    #[test]
    fn test_employee_is_read_only() {
        let definition = RoleKey::Employee.definition();
        assert_eq!(definition.display_name, "Employee");
        assert_eq!(
            definition.permissions.into_iter().collect::<Vec<_>>(),
            vec![PermissionKey::Read]
        );
    }

    #[test]
    fn test_super_admin_has_everything() {
        assert_eq!(
            RoleKey::SuperAdmin.definition().permissions.len(),
            PermissionKey::ALL.len()
        );
        assert!(!RoleKey::Admin
            .definition()
            .permissions
            .contains(&PermissionKey::ManageModules));
    }

    #[test]
    fn test_parse_skips_unknown() {
        let roles = parse_roles(&["admin", "nobody", "Employee"]);
        assert_eq!(
            roles.into_iter().collect::<Vec<_>>(),
            vec![RoleKey::Admin, RoleKey::Employee]
        );
        assert!(parse_permissions(&["fly"]).is_empty());
        assert_eq!(parse_modules(&["geography"]).len(), 1);
    }
}
