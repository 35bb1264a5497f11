//! Console routes and the session redirect rules.

use crate::auth::ModuleKey;
use crate::entity::EntityKind;
use std::fmt;

/// Specifying the different routes.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Employees,
    Entity(EntityKind),
    Departments,
    Settings,
    NotFound(String),
}

impl Route {
    /// Routes listed in the sidebar, in display order.
    ///
    pub const SIDEBAR: [Route; 11] = [
        Route::Dashboard,
        Route::Employees,
        Route::Entity(EntityKind::User),
        Route::Entity(EntityKind::Role),
        Route::Entity(EntityKind::Permission),
        Route::Entity(EntityKind::Module),
        Route::Entity(EntityKind::Country),
        Route::Entity(EntityKind::State),
        Route::Entity(EntityKind::City),
        Route::Departments,
        Route::Settings,
    ];

    /// Parses a path. Unknown paths become [`Route::NotFound`].
    ///
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim();
        let normalized = format!("/{}", trimmed.trim_matches('/').to_lowercase());
        match normalized.as_str() {
            "/login" => Route::Login,
            "/dashboard" => Route::Dashboard,
            "/employees" => Route::Employees,
            "/users" => Route::Entity(EntityKind::User),
            "/roles" => Route::Entity(EntityKind::Role),
            "/permissions" => Route::Entity(EntityKind::Permission),
            "/modules" => Route::Entity(EntityKind::Module),
            "/countries" => Route::Entity(EntityKind::Country),
            "/states" => Route::Entity(EntityKind::State),
            "/cities" => Route::Entity(EntityKind::City),
            "/departments" => Route::Departments,
            "/settings" => Route::Settings,
            _ => Route::NotFound(trimmed.to_owned()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_owned(),
            Route::Dashboard => "/dashboard".to_owned(),
            Route::Employees => "/employees".to_owned(),
            Route::Entity(kind) => format!("/{}", kind.plural().to_lowercase()),
            Route::Departments => "/departments".to_owned(),
            Route::Settings => "/settings".to_owned(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Employees => "Employees",
            Route::Entity(kind) => kind.plural(),
            Route::Departments => "Departments",
            Route::Settings => "Settings",
            Route::NotFound(_) => "Not Found",
        }
    }

    /// Returns the module a user needs to reach the route.
    ///
    pub fn module(&self) -> Option<ModuleKey> {
        match self {
            Route::Dashboard => Some(ModuleKey::Dashboard),
            Route::Employees => Some(ModuleKey::Employees),
            Route::Entity(EntityKind::User) => Some(ModuleKey::UserManagement),
            Route::Entity(EntityKind::Role | EntityKind::Permission | EntityKind::Module) => {
                Some(ModuleKey::AccessControl)
            }
            Route::Entity(EntityKind::Country | EntityKind::State | EntityKind::City) => {
                Some(ModuleKey::Geography)
            }
            Route::Departments => Some(ModuleKey::Departments),
            Route::Settings => Some(ModuleKey::Settings),
            Route::Login | Route::NotFound(_) => None,
        }
    }

    pub fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            Route::Entity(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Resolves a requested path against the session. Without a stored token
/// every path lands on the login route; with one, the login route lands on
/// the dashboard.
///
pub fn resolve(path: &str, authenticated: bool) -> Route {
    match (Route::parse(path), authenticated) {
        (_, false) => Route::Login,
        (Route::Login, true) => Route::Dashboard,
        (route, true) => route,
    }
}
