use super::{AccessEditor, Focus, InputMode, StateError};
use crate::app::{ConfigSaveSender, NetworkEventSender};
use crate::auth::{self, AccessKind, AccessUpdate, Action, AuthContext, PermissionDenied, UserAccess};
use crate::config::Config;
use crate::entity::{City, Country, EntityKind, Module, Permission, Role, StateProvince, User};
use crate::events::network::Event as NetworkEvent;
use crate::gateway::GatewayError;
use crate::logger::LogBuffer;
use crate::router::{self, Route};
use crate::screen::{describe_failure, EntityScreen, Notice, Screen};
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::layout::Rect;

/// Identity of the signed-in operator in the authorization context.
///
pub const SESSION_USER_ID: &str = "session";

/// Houses data representative of application state.
///
pub struct State {
    net_sender: NetworkEventSender,
    config_save_sender: ConfigSaveSender,
    route: Route,
    focus: Focus,
    input_mode: InputMode,
    menu_index: usize,
    access_token: Option<String>,
    token_input: String,
    login_error: Option<String>,
    goto_input: String,
    banner: Option<Notice>,
    session_roles: Vec<String>,
    auth: AuthContext,
    users: EntityScreen<User>,
    roles: EntityScreen<Role>,
    permissions: EntityScreen<Permission>,
    modules: EntityScreen<Module>,
    countries: EntityScreen<Country>,
    states: EntityScreen<StateProvince>,
    cities: EntityScreen<City>,
    access_editor: Option<AccessEditor>,
    show_log: bool,
    log_buffer: LogBuffer,
    theme: Theme,
    terminal_size: Rect,
    spinner_index: usize,
}

impl State {
    /// Returns a new signed-out instance configured from the settings.
    ///
    pub fn new(
        net_sender: NetworkEventSender,
        config_save_sender: ConfigSaveSender,
        config: &Config,
        log_buffer: LogBuffer,
    ) -> Self {
        let items_per_page = config.items_per_page;
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using default", config.theme_name);
            Theme::default()
        });
        State {
            net_sender,
            config_save_sender,
            route: Route::Login,
            focus: Focus::View,
            input_mode: InputMode::Token,
            menu_index: 0,
            access_token: config.access_token.clone(),
            token_input: String::new(),
            login_error: None,
            goto_input: String::new(),
            banner: None,
            session_roles: config.session_roles.clone(),
            auth: AuthContext::new(),
            users: EntityScreen::new(items_per_page),
            roles: EntityScreen::new(items_per_page),
            permissions: EntityScreen::new(items_per_page),
            modules: EntityScreen::new(items_per_page),
            countries: EntityScreen::new(items_per_page),
            states: EntityScreen::new(items_per_page),
            cities: EntityScreen::new(items_per_page),
            access_editor: None,
            show_log: false,
            log_buffer,
            theme,
            terminal_size: Rect::default(),
            spinner_index: 0,
        }
    }

    /// Resumes a stored session or lands on the login route.
    ///
    pub fn start(&mut self) {
        if self.is_authenticated() {
            info!("Resuming stored session...");
            self.begin_session();
        } else {
            info!("No stored access token, showing login...");
            self.navigate("/login");
        }
    }

    fn begin_session(&mut self) {
        let roles = auth::catalog::parse_roles(&self.session_roles);
        self.auth
            .sign_in(UserAccess::from_roles(SESSION_USER_ID, "operator", roles));
        self.navigate("/dashboard");
        self.refresh_all();
    }

    fn send(&self, event: NetworkEvent) {
        let result = self
            .net_sender
            .send(event)
            .map_err(|e| StateError::ChannelClosed(e.to_string()));
        if let Err(e) = result {
            error!("Failed to send network event: {}", e);
        }
    }

    fn request_config_save(&self) {
        if let Err(e) = self.config_save_sender.send(()) {
            error!("Failed to request config save: {}", e);
        }
    }

    // Session

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn token_input(&self) -> &str {
        &self.token_input
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn add_token_char(&mut self, c: char) -> &mut Self {
        self.login_error = None;
        self.token_input.push(c);
        self
    }

    pub fn backspace_token(&mut self) -> &mut Self {
        self.token_input.pop();
        self
    }

    /// Stores the typed token and signs in.
    ///
    pub fn submit_token(&mut self) -> &mut Self {
        let token = self.token_input.trim().to_owned();
        if token.is_empty() {
            self.login_error = Some("Enter an access token to continue".to_owned());
            return self;
        }
        info!("Signing in with new access token...");
        self.token_input.clear();
        self.login_error = None;
        self.banner = None;
        self.access_token = Some(token.clone());
        self.send(NetworkEvent::SetToken { token: Some(token) });
        self.request_config_save();
        self.begin_session();
        self
    }

    /// Signs out at the operator's request.
    ///
    pub fn logout(&mut self) -> &mut Self {
        info!("Signing out...");
        self.teardown(None);
        self
    }

    /// Signs out after the gateway rejected the token.
    ///
    pub fn force_logout(&mut self) -> &mut Self {
        warn!("Gateway rejected the access token, signing out...");
        self.teardown(Some(Notice::error("Session expired, please sign in again")));
        self
    }

    fn teardown(&mut self, banner: Option<Notice>) {
        self.access_token = None;
        self.auth.clear();
        for kind in EntityKind::ALL {
            self.screen_mut(kind).reset();
        }
        self.access_editor = None;
        self.goto_input.clear();
        self.banner = banner;
        self.send(NetworkEvent::SetToken { token: None });
        self.request_config_save();
        self.navigate("/login");
    }

    // Navigation

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn current_focus(&self) -> Focus {
        self.focus
    }

    pub fn toggle_focus(&mut self) -> &mut Self {
        self.focus = self.focus.toggled();
        self
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Moves to the path, applying the session redirects and module gating.
    /// Entity routes fetch on arrival. Returns whether the requested route was
    /// opened; a session redirect or a denial returns false.
    ///
    pub fn navigate(&mut self, path: &str) -> bool {
        let route = router::resolve(path, self.is_authenticated());
        let redirected = route != Route::parse(path);
        if !self.auth.can_access(&route) {
            warn!("Access to {} denied", route);
            self.banner = Some(Notice::warning(format!(
                "You do not have access to {}",
                route.title()
            )));
            return false;
        }
        debug!("Navigating to {}...", route);
        self.access_editor = None;
        self.input_mode = match route {
            Route::Login => InputMode::Token,
            _ => InputMode::Normal,
        };
        if let Some(index) = self.sidebar_routes().iter().position(|r| *r == route) {
            self.menu_index = index;
        }
        self.route = route;
        match self.route.clone() {
            Route::Entity(kind) => self.refresh(kind),
            Route::Employees => self.refresh(EntityKind::User),
            _ => (),
        }
        if redirected {
            debug!("Redirected {} to {}", path, self.route);
        }
        !redirected
    }

    /// Returns the sidebar routes the operator may open.
    ///
    pub fn sidebar_routes(&self) -> Vec<Route> {
        if !self.is_authenticated() {
            return vec![];
        }
        Route::SIDEBAR
            .into_iter()
            .filter(|route| self.auth.can_access(route))
            .collect()
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    pub fn next_menu_item(&mut self) -> &mut Self {
        let count = self.sidebar_routes().len();
        if count > 0 {
            self.menu_index = (self.menu_index + 1) % count;
        }
        self
    }

    pub fn previous_menu_item(&mut self) -> &mut Self {
        let count = self.sidebar_routes().len();
        if count > 0 {
            self.menu_index = (self.menu_index + count - 1) % count;
        }
        self
    }

    /// Opens the highlighted sidebar route.
    ///
    pub fn select_menu_item(&mut self) -> &mut Self {
        if let Some(route) = self.sidebar_routes().get(self.menu_index).cloned() {
            if self.navigate(&route.path()) {
                self.focus = Focus::View;
            }
        }
        self
    }

    pub fn goto_input(&self) -> &str {
        &self.goto_input
    }

    pub fn start_goto(&mut self) -> &mut Self {
        self.goto_input = "/".to_owned();
        self.input_mode = InputMode::Goto;
        self
    }

    pub fn add_goto_char(&mut self, c: char) -> &mut Self {
        self.goto_input.push(c);
        self
    }

    pub fn backspace_goto(&mut self) -> &mut Self {
        self.goto_input.pop();
        self
    }

    pub fn cancel_goto(&mut self) -> &mut Self {
        self.goto_input.clear();
        self.input_mode = InputMode::Normal;
        self
    }

    pub fn submit_goto(&mut self) -> &mut Self {
        let path = std::mem::take(&mut self.goto_input);
        self.input_mode = InputMode::Normal;
        self.navigate(&path);
        self
    }

    // Screens

    pub fn screen(&self, kind: EntityKind) -> &dyn Screen {
        match kind {
            EntityKind::User => &self.users,
            EntityKind::Role => &self.roles,
            EntityKind::Permission => &self.permissions,
            EntityKind::Module => &self.modules,
            EntityKind::Country => &self.countries,
            EntityKind::State => &self.states,
            EntityKind::City => &self.cities,
        }
    }

    pub fn screen_mut(&mut self, kind: EntityKind) -> &mut dyn Screen {
        self.screen_and_auth(kind).0
    }

    fn screen_and_auth(&mut self, kind: EntityKind) -> (&mut dyn Screen, &AuthContext) {
        let screen: &mut dyn Screen = match kind {
            EntityKind::User => &mut self.users,
            EntityKind::Role => &mut self.roles,
            EntityKind::Permission => &mut self.permissions,
            EntityKind::Module => &mut self.modules,
            EntityKind::Country => &mut self.countries,
            EntityKind::State => &mut self.states,
            EntityKind::City => &mut self.cities,
        };
        (screen, &self.auth)
    }

    pub fn active_screen(&self) -> Option<&dyn Screen> {
        self.route.entity_kind().map(|kind| self.screen(kind))
    }

    pub fn active_screen_mut(&mut self) -> Option<&mut dyn Screen> {
        match self.route.entity_kind() {
            Some(kind) => Some(self.screen_mut(kind)),
            None => None,
        }
    }

    pub fn users(&self) -> &EntityScreen<User> {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut EntityScreen<User> {
        &mut self.users
    }

    pub fn roles_mut(&mut self) -> &mut EntityScreen<Role> {
        &mut self.roles
    }

    pub fn permissions_mut(&mut self) -> &mut EntityScreen<Permission> {
        &mut self.permissions
    }

    pub fn modules_mut(&mut self) -> &mut EntityScreen<Module> {
        &mut self.modules
    }

    pub fn countries_mut(&mut self) -> &mut EntityScreen<Country> {
        &mut self.countries
    }

    pub fn states_mut(&mut self) -> &mut EntityScreen<StateProvince> {
        &mut self.states
    }

    pub fn cities_mut(&mut self) -> &mut EntityScreen<City> {
        &mut self.cities
    }

    /// Returns the record count of every collection, for the dashboard.
    ///
    pub fn record_counts(&self) -> Vec<(EntityKind, usize)> {
        EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, self.screen(kind).total_records()))
            .collect()
    }

    /// Starts a fetch of the collection.
    ///
    pub fn refresh(&mut self, kind: EntityKind) {
        if !self.is_authenticated() {
            return;
        }
        let generation = self.screen_mut(kind).begin_fetch();
        self.send(NetworkEvent::Load { kind, generation });
    }

    pub fn refresh_all(&mut self) {
        for kind in EntityKind::ALL {
            self.refresh(kind);
        }
    }

    /// Seeds role-derived access for the fetched users.
    ///
    pub fn sync_user_access(&mut self) {
        self.auth.sync_users(self.users.list().records());
    }

    /// Returns the actions offered on the active route.
    ///
    pub fn available_actions(&self) -> Vec<Action> {
        let mut candidates = vec![Action::View, Action::Create, Action::Edit, Action::Delete];
        match self.route {
            Route::Entity(EntityKind::User) => candidates.push(Action::ManageAccess),
            Route::Entity(_) => (),
            _ => return vec![],
        }
        self.auth.available_actions(&candidates)
    }

    /// Opens the dialog for the action on the active table. Denied actions
    /// never open a dialog.
    ///
    pub fn open_dialog(&mut self, action: Action) -> bool {
        if action == Action::ManageAccess {
            return self.open_access_editor();
        }
        let kind = match self.route.entity_kind() {
            Some(kind) => kind,
            None => return false,
        };
        let (screen, auth) = self.screen_and_auth(kind);
        let opened = match action {
            Action::Create => screen.open_add(auth),
            Action::Edit => screen.open_edit(auth),
            Action::Delete => screen.open_delete(auth),
            Action::View => screen.open_view(auth),
            Action::ManageAccess => false,
        };
        if opened && matches!(action, Action::Create | Action::Edit) {
            self.input_mode = InputMode::Form;
        }
        opened
    }

    pub fn close_dialog(&mut self) -> &mut Self {
        if let Some(screen) = self.active_screen_mut() {
            screen.close();
        }
        self.input_mode = InputMode::Normal;
        self
    }

    /// Sends the open form when it validates.
    ///
    pub fn submit_form(&mut self) -> &mut Self {
        let request = self.active_screen_mut().and_then(|screen| screen.prepare_submit());
        if let Some(request) = request {
            info!("Saving {} \"{}\"...", request.kind.singular(), request.label);
            self.send(NetworkEvent::Save(request));
        }
        self
    }

    /// Applies a save outcome, returning to command keys once the form closed.
    ///
    pub fn after_save(&mut self, kind: EntityKind) {
        if self.route.entity_kind() == Some(kind) && self.screen(kind).form().is_none() {
            self.input_mode = InputMode::Normal;
        }
    }

    /// Sends the confirmed delete.
    ///
    pub fn confirm_delete(&mut self) -> &mut Self {
        let request = self.active_screen_mut().and_then(|screen| screen.prepare_delete());
        if let Some(request) = request {
            info!("Deleting {} \"{}\"...", request.kind.singular(), request.label);
            self.send(NetworkEvent::Delete(request));
        }
        self
    }

    pub fn start_search(&mut self) -> &mut Self {
        if let Some(screen) = self.active_screen_mut() {
            screen.set_searching(true);
            self.input_mode = InputMode::Search;
        }
        self
    }

    pub fn add_search_char(&mut self, c: char) -> &mut Self {
        if let Some(screen) = self.active_screen_mut() {
            screen.push_search_char(c);
        }
        self
    }

    pub fn backspace_search(&mut self) -> &mut Self {
        if let Some(screen) = self.active_screen_mut() {
            screen.pop_search_char();
        }
        self
    }

    /// Leaves search input, keeping the filter.
    ///
    pub fn finish_search(&mut self) -> &mut Self {
        if let Some(screen) = self.active_screen_mut() {
            screen.set_searching(false);
        }
        self.input_mode = InputMode::Normal;
        self
    }

    /// Leaves search input and clears the filter.
    ///
    pub fn cancel_search(&mut self) -> &mut Self {
        if let Some(screen) = self.active_screen_mut() {
            screen.clear_search();
        }
        self.input_mode = InputMode::Normal;
        self
    }

    pub fn banner(&self) -> Option<&Notice> {
        self.banner.as_ref()
    }

    pub fn dismiss_notices(&mut self) -> &mut Self {
        self.banner = None;
        if let Some(screen) = self.active_screen_mut() {
            screen.dismiss_notice();
        }
        self
    }

    // Access editor

    pub fn access_editor(&self) -> Option<&AccessEditor> {
        self.access_editor.as_ref()
    }

    pub fn access_editor_mut(&mut self) -> Option<&mut AccessEditor> {
        self.access_editor.as_mut()
    }

    /// Returns the id and username of the user the access editor would
    /// open for.
    ///
    fn access_target(&self) -> Result<Option<(String, String)>, StateError> {
        if !self.is_authenticated() {
            return Err(StateError::NotSignedIn);
        }
        if self.route != Route::Entity(EntityKind::User) {
            return Err(StateError::NoScreen {
                route: self.route.path(),
            });
        }
        self.auth.authorize(Action::ManageAccess)?;
        Ok(self.users.selected_identity())
    }

    fn open_access_editor(&mut self) -> bool {
        let (user_id, username) = match self.access_target() {
            Ok(Some(identity)) => identity,
            Ok(None) => return false,
            Err(StateError::PermissionDenied(denied)) => {
                warn!("{}", denied);
                self.users.set_notice(Notice::error(denied.to_string()));
                return false;
            }
            Err(e) => {
                debug!("Access editor unavailable: {}", e);
                return false;
            }
        };
        self.sync_user_access();
        let access = self
            .auth
            .user(&user_id)
            .cloned()
            .unwrap_or_else(|| UserAccess::from_roles(&user_id, &username, Default::default()));
        debug!("Opening access editor for user {}...", user_id);
        self.access_editor = Some(AccessEditor::new(&access));
        self.input_mode = InputMode::Access;
        true
    }

    pub fn close_access_editor(&mut self) -> &mut Self {
        self.access_editor = None;
        self.input_mode = InputMode::Normal;
        self
    }

    /// Applies the current section of the access editor locally, then sends
    /// it to the gateway.
    ///
    pub fn apply_access(&mut self) -> &mut Self {
        let editor = match self.access_editor.as_ref() {
            Some(editor) => editor.clone(),
            None => return self,
        };
        if !self.auth.has_permission(editor.required_permission()) {
            let denied = PermissionDenied(Action::ManageAccess);
            warn!("{} ({} required)", denied, editor.required_permission());
            self.users.set_notice(Notice::error(denied.to_string()));
            return self;
        }
        let update = match editor.section() {
            AccessKind::Roles => self
                .auth
                .update_user_roles(&editor.user_id, editor.roles().clone()),
            AccessKind::Permissions => self
                .auth
                .update_user_permissions(&editor.user_id, editor.permissions().clone()),
            AccessKind::Modules => self
                .auth
                .update_user_modules(&editor.user_id, editor.modules().clone()),
        };
        if let (Some(editor), Some(access)) =
            (self.access_editor.as_mut(), self.auth.user(&update.user_id))
        {
            editor.refresh(access);
        }
        let notice = if update.discarded_override {
            Notice::warning(format!(
                "Roles updated for {}; explicit permissions were replaced by the role defaults",
                editor.display_name
            ))
        } else {
            Notice::success(format!("Access updated for {}", editor.display_name))
        };
        self.users.set_notice(notice);
        self.send(NetworkEvent::AssignAccess(update));
        self
    }

    /// Keeps the local change after the gateway refused an access update.
    ///
    pub fn access_update_failed(&mut self, update: &AccessUpdate, error: &GatewayError) {
        warn!(
            "Access update for user {} kept locally, gateway call failed: {}",
            update.user_id, error
        );
        let reason = describe_failure(EntityKind::User, error, None);
        self.users.set_notice(Notice::warning(format!(
            "Access change saved locally only: {}",
            reason
        )));
    }

    // Presentation

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    pub fn log_lines(&self, count: usize) -> Vec<String> {
        self.log_buffer.tail(count)
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
        self
    }

    pub fn spinner_index(&self) -> usize {
        self.spinner_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{PermissionKey, RoleKey};
    use crate::entity::Status;
    use crate::gateway::ApiResponse;
    use std::sync::mpsc::{channel, Receiver};

    fn state_with(roles: &[&str], token: Option<&str>) -> (State, Receiver<NetworkEvent>, Receiver<()>) {
        let (net_tx, net_rx) = channel();
        let (save_tx, save_rx) = channel();
        let mut config = Config::new();
        config.session_roles = roles.iter().map(|r| r.to_string()).collect();
        config.access_token = token.map(str::to_owned);
        let state = State::new(net_tx, save_tx, &config, LogBuffer::new(10));
        (state, net_rx, save_rx)
    }

    fn drain(rx: &Receiver<NetworkEvent>) -> Vec<NetworkEvent> {
        rx.try_iter().collect()
    }

    fn user(id: &str, username: &str, roles: &[&str]) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
            full_name: username.to_string(),
            email: format!("{}@example.com", username),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            status: Status::Active,
            created_at: None,
            updated_at: None,
        }
    }

    fn load_users(state: &mut State, users: Vec<User>) {
        let generation = state.screen_mut(EntityKind::User).begin_fetch();
        state.users_mut().finish_fetch(generation, Ok(users));
        state.sync_user_access();
    }

    #[test]
    fn test_start_without_token_shows_login() {
        let (mut state, net_rx, _) = state_with(&["admin"], None);
        state.start();
        assert_eq!(state.route(), &Route::Login);
        assert_eq!(state.input_mode(), InputMode::Token);
        assert!(state.sidebar_routes().is_empty());
        assert!(drain(&net_rx).is_empty());
        assert!(!state.navigate("/users"));
        assert_eq!(state.route(), &Route::Login);
    }

    #[test]
    fn test_start_with_token_loads_everything() {
        let (mut state, net_rx, _) = state_with(&["admin"], Some("abc"));
        state.start();
        assert_eq!(state.route(), &Route::Dashboard);
        let loads = drain(&net_rx)
            .into_iter()
            .filter(|e| matches!(e, NetworkEvent::Load { .. }))
            .count();
        assert_eq!(loads, EntityKind::ALL.len());
        assert!(state.auth().has_permission(PermissionKey::Delete));
    }

    #[test]
    fn test_submit_token_signs_in_and_saves() {
        let (mut state, net_rx, save_rx) = state_with(&["employee"], None);
        state.start();
        state.submit_token();
        assert_eq!(state.login_error(), Some("Enter an access token to continue"));
        for c in " tok ".chars() {
            state.add_token_char(c);
        }
        state.submit_token();
        assert_eq!(state.access_token(), Some("tok"));
        assert_eq!(state.route(), &Route::Dashboard);
        assert!(save_rx.try_recv().is_ok());
        assert!(matches!(
            drain(&net_rx).first(),
            Some(NetworkEvent::SetToken { token: Some(t) }) if t == "tok"
        ));
    }

    #[test]
    fn test_module_gating_blocks_navigation() {
        let (mut state, _, _) = state_with(&["employee"], Some("abc"));
        state.start();
        assert!(!state.navigate("/countries"));
        assert_eq!(state.route(), &Route::Dashboard);
        assert!(state.banner().is_some());
        assert!(state.navigate("/employees"));
        assert!(!state
            .sidebar_routes()
            .contains(&Route::Entity(EntityKind::City)));
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let (mut state, _, _) = state_with(&["admin"], Some("abc"));
        state.start();
        assert!(state.navigate("/payroll"));
        assert!(matches!(state.route(), Route::NotFound(_)));
        assert!(state.available_actions().is_empty());
    }

    #[test]
    fn test_login_path_redirects_when_signed_in() {
        let (mut state, _, _) = state_with(&["admin"], Some("abc"));
        state.start();
        state.navigate("/users");
        assert!(!state.navigate("/login"));
        assert_eq!(state.route(), &Route::Dashboard);
        assert!(state.navigate("/countries"));
        assert_eq!(state.route(), &Route::Entity(EntityKind::Country));
    }

    #[test]
    fn test_footer_actions_follow_permissions() {
        let (mut state, _, _) = state_with(&["hr_manager"], Some("abc"));
        state.start();
        state.navigate("/users");
        let actions = state.available_actions();
        assert!(actions.contains(&Action::Create));
        assert!(!actions.contains(&Action::Delete));
        assert!(!actions.contains(&Action::ManageAccess));
    }

    #[test]
    fn test_denied_dialog_never_opens() {
        let (mut state, _, _) = state_with(&["employee"], Some("abc"));
        state.start();
        state.navigate("/employees");
        state.auth.update_user_modules(
            SESSION_USER_ID,
            [crate::auth::ModuleKey::UserManagement].into_iter().collect(),
        );
        state.navigate("/users");
        load_users(&mut state, vec![user("1", "ada", &["admin"])]);
        assert!(!state.open_dialog(Action::Delete));
        assert_eq!(state.input_mode(), InputMode::Normal);
        assert!(state.open_dialog(Action::View));
    }

    #[test]
    fn test_create_flow_sends_save() {
        let (mut state, net_rx, _) = state_with(&["admin"], Some("abc"));
        state.start();
        state.navigate("/countries");
        drain(&net_rx);
        assert!(state.open_dialog(Action::Create));
        assert_eq!(state.input_mode(), InputMode::Form);
        {
            let form = state.active_screen_mut().unwrap().form_mut().unwrap();
            for c in "Peru".chars() {
                form.insert_char(c);
            }
            form.focus_next();
            for c in "pe".chars() {
                form.insert_char(c);
            }
        }
        state.submit_form();
        match drain(&net_rx).pop() {
            Some(NetworkEvent::Save(request)) => {
                assert_eq!(request.kind, EntityKind::Country);
                assert_eq!(request.payload["countryCode"], "PE");
            }
            other => panic!("unexpected event {:?}", other),
        }
        let refetch = state.screen_mut(EntityKind::Country).finish_save(
            crate::entity::SaveMode::Create,
            "Peru",
            Ok(ApiResponse::default()),
        );
        assert!(refetch);
        state.after_save(EntityKind::Country);
        assert_eq!(state.input_mode(), InputMode::Normal);
    }

    #[test]
    fn test_access_editor_applies_and_sends() {
        let (mut state, net_rx, _) = state_with(&["super_admin"], Some("abc"));
        state.start();
        state.navigate("/users");
        load_users(&mut state, vec![user("7", "grace", &["employee"])]);
        drain(&net_rx);

        assert!(state.open_dialog(Action::ManageAccess));
        assert_eq!(state.input_mode(), InputMode::Access);
        state.access_editor_mut().unwrap().toggle();
        state.apply_access();

        let access = state.auth().user("7").unwrap();
        assert!(access.roles().contains(&RoleKey::SuperAdmin));
        match drain(&net_rx).pop() {
            Some(NetworkEvent::AssignAccess(update)) => {
                assert_eq!(update.user_id, "7");
                assert_eq!(update.kind, AccessKind::Roles);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_access_failure_keeps_local_change() {
        let (mut state, _, _) = state_with(&["super_admin"], Some("abc"));
        state.start();
        let update = state
            .auth
            .update_user_roles("7", [RoleKey::Manager].into_iter().collect());
        state.access_update_failed(&update, &GatewayError::Http { status: 500, message: None });
        assert!(state.auth().user("7").unwrap().roles().contains(&RoleKey::Manager));
        let notice = state.users().notice().unwrap();
        assert!(notice.message.contains("saved locally"));
    }

    #[test]
    fn test_force_logout_tears_down() {
        let (mut state, net_rx, save_rx) = state_with(&["admin"], Some("abc"));
        state.start();
        state.navigate("/users");
        load_users(&mut state, vec![user("1", "ada", &["admin"])]);
        drain(&net_rx);

        state.force_logout();
        assert!(!state.is_authenticated());
        assert!(!state.auth().is_signed_in());
        assert_eq!(state.route(), &Route::Login);
        assert_eq!(state.users().list().records().len(), 0);
        assert!(state.banner().unwrap().message.contains("Session expired"));
        assert!(save_rx.try_recv().is_ok());
        assert!(matches!(
            drain(&net_rx).first(),
            Some(NetworkEvent::SetToken { token: None })
        ));
    }

    #[test]
    fn test_goto_prompt() {
        let (mut state, _, _) = state_with(&["admin"], Some("abc"));
        state.start();
        state.start_goto();
        for c in "roles".chars() {
            state.add_goto_char(c);
        }
        state.submit_goto();
        assert_eq!(state.route(), &Route::Entity(EntityKind::Role));
        assert_eq!(state.input_mode(), InputMode::Normal);
    }
}
