//! Endpoint table for the gateway's entity routes.

use crate::entity::EntityKind;

/// Paths for one entity's CRUD routes, relative to the gateway base URL.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub list: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    delete_prefix: &'static str,
}

impl Endpoints {
    /// Returns the delete path for the record.
    ///
    pub fn delete(&self, id: &str) -> String {
        format!("{}/{}", self.delete_prefix, id)
    }

    /// Returns the endpoints for the entity type.
    ///
    pub fn of(kind: EntityKind) -> Endpoints {
        match kind {
            EntityKind::User => Endpoints {
                list: "Users/get-all-user",
                create: "Users/user-create",
                update: "Users/user-update",
                delete_prefix: "Users/user-delete",
            },
            EntityKind::Role => Endpoints {
                list: "Roles/get-all-role",
                create: "Roles/create-role",
                update: "Roles/update-role",
                delete_prefix: "Roles/delete-role",
            },
            EntityKind::Permission => Endpoints {
                list: "Permissions/permissions-all",
                create: "Permissions/create-permission",
                update: "Permissions/update-permission",
                delete_prefix: "Permissions/delete",
            },
            EntityKind::Module => Endpoints {
                list: "Module/getall-module",
                create: "Module/create-module",
                update: "Module/module-update",
                delete_prefix: "Module/delete-module",
            },
            EntityKind::Country => Endpoints {
                list: "Country/countries-all",
                create: "Country/country-create",
                update: "Country/country-update",
                delete_prefix: "Country/country-delete",
            },
            EntityKind::State => Endpoints {
                list: "State/states-all",
                create: "State/state-create",
                update: "State/state-update",
                delete_prefix: "State/state-delete",
            },
            EntityKind::City => Endpoints {
                list: "City/get-all-cities",
                create: "City/city-create",
                update: "City/city-update",
                delete_prefix: "City/city-delete",
            },
        }
    }
}

/// Paths for user access assignment.
///
pub const ASSIGN_ROLES: &str = "Users/assign-roles";
pub const ASSIGN_PERMISSIONS: &str = "Users/assign-permissions";
pub const ASSIGN_MODULES: &str = "Users/assign-modules";
