//! Generic entity screen.
//!
//! One [`EntityScreen`] drives every entity type: it owns the list view and
//! the form dialog, tracks fetch generations and mutation progress, and turns
//! gateway outcomes into banners and notices. Network calls happen elsewhere;
//! the screen only prepares requests and applies their results.

mod form;

pub use form::FormState;

use crate::auth::{Action, AuthContext};
use crate::entity::{Column, Entity, EntityKind, SaveMode};
use crate::gateway::{ApiResponse, GatewayError};
use crate::list_view::{ListView, Modal, Sort};
use log::*;
use serde_json::Value;

/// Specifying notice severity.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Transient message shown over the screen until dismissed.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// A create or update ready to send.
///
#[derive(Clone, Debug, PartialEq)]
pub struct SaveRequest {
    pub kind: EntityKind,
    pub mode: SaveMode,
    pub payload: Value,
    pub label: String,
}

/// A confirmed delete ready to send.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteRequest {
    pub kind: EntityKind,
    pub id: String,
    pub label: String,
}

/// Modal dialog contents, independent of the record type.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalView {
    None,
    Form { title: String },
    DeleteConfirm { label: String },
    View { details: Vec<(&'static str, String)> },
}

/// Returns the user-facing message for a failed gateway call. A conflict
/// names the colliding value when one is known.
///
pub fn describe_failure(kind: EntityKind, error: &GatewayError, value: Option<&str>) -> String {
    if error.is_conflict() {
        return match value {
            Some(value) => format!("{} \"{}\" already exists", kind.singular(), value),
            None => error
                .server_message()
                .map(str::to_owned)
                .unwrap_or_else(|| format!("{} already exists", kind.singular())),
        };
    }
    match error {
        GatewayError::Transport(_) => "Error connecting to server".to_owned(),
        GatewayError::Unauthorized => "Session expired, please sign in again".to_owned(),
        GatewayError::Http { status, message } => message
            .clone()
            .unwrap_or_else(|| format!("Request failed with status {}", status)),
        GatewayError::Rejected { message, .. } => message
            .clone()
            .unwrap_or_else(|| "The server did not accept the request".to_owned()),
        GatewayError::Conflict { .. } => format!("{} already exists", kind.singular()),
        GatewayError::Deserialization(_) | GatewayError::Wire(_) => {
            format!("Unexpected response from server: {}", error)
        }
    }
}

/// Houses the list view and dialogs for one entity type.
///
pub struct EntityScreen<E: Entity> {
    list: ListView<E>,
    form: Option<FormState>,
    loading: bool,
    error: Option<String>,
    operation_loading: bool,
    notice: Option<Notice>,
    searching: bool,
    generation: u64,
}

impl<E: Entity> EntityScreen<E> {
    pub fn new(items_per_page: usize) -> Self {
        EntityScreen {
            list: ListView::new(items_per_page, E::searchable_fields()),
            form: None,
            loading: false,
            error: None,
            operation_loading: false,
            notice: None,
            searching: false,
            generation: 0,
        }
    }

    pub fn list(&self) -> &ListView<E> {
        &self.list
    }

    /// Applies a list response when it belongs to the latest fetch. Returns
    /// whether it was applied.
    ///
    pub fn finish_fetch(&mut self, generation: u64, result: Result<Vec<E>, GatewayError>) -> bool {
        if generation != self.generation {
            debug!(
                "Discarding superseded {} response (generation {}, current {})",
                E::KIND.plural(),
                generation,
                self.generation
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                self.error = None;
                self.list.set_records(records);
            }
            Err(e) => {
                error!("Failed to load {}: {}", E::KIND.plural(), e);
                self.error = Some(describe_failure(E::KIND, &e, None));
            }
        }
        true
    }

    fn gate(&mut self, auth: &AuthContext, action: Action) -> bool {
        match auth.authorize(action) {
            Ok(()) => true,
            Err(denied) => {
                warn!("{} on {}", denied, E::KIND.plural());
                self.notice = Some(Notice::error(denied.to_string()));
                false
            }
        }
    }

    fn selected_record(&self) -> Option<E> {
        self.list.selected().cloned()
    }
}

/// Object-safe view of an [`EntityScreen`] used by rendering and key
/// handling.
///
pub trait Screen: Send {
    fn kind(&self) -> EntityKind;

    fn columns(&self) -> &'static [Column];

    /// Returns the current page as rendered cell text.
    ///
    fn rows(&self) -> Vec<Vec<String>>;

    fn total_records(&self) -> usize;

    fn filtered_count(&self) -> usize;

    fn selected_index(&self) -> usize;

    /// Returns the id and unique value of the row under the cursor.
    ///
    fn selected_identity(&self) -> Option<(String, String)>;

    fn current_page(&self) -> usize;

    fn total_pages(&self) -> usize;

    fn sort(&self) -> Option<Sort>;

    fn sort_by_column(&mut self, index: usize);

    fn search_term(&self) -> String;

    fn is_searching(&self) -> bool;

    fn set_searching(&mut self, searching: bool);

    fn push_search_char(&mut self, c: char);

    fn pop_search_char(&mut self);

    fn clear_search(&mut self);

    fn select_next(&mut self);

    fn select_previous(&mut self);

    fn next_page(&mut self);

    fn previous_page(&mut self);

    fn is_loading(&self) -> bool;

    fn error(&self) -> Option<&str>;

    fn operation_loading(&self) -> bool;

    fn notice(&self) -> Option<&Notice>;

    fn set_notice(&mut self, notice: Notice);

    fn dismiss_notice(&mut self);

    fn modal_view(&self) -> ModalView;

    fn form(&self) -> Option<&FormState>;

    fn form_mut(&mut self) -> Option<&mut FormState>;

    fn open_add(&mut self, auth: &AuthContext) -> bool;

    fn open_edit(&mut self, auth: &AuthContext) -> bool;

    fn open_delete(&mut self, auth: &AuthContext) -> bool;

    fn open_view(&mut self, auth: &AuthContext) -> bool;

    /// Closes every dialog and discards form input.
    ///
    fn close(&mut self);

    /// Starts a fetch and returns its generation ticket.
    ///
    fn begin_fetch(&mut self) -> u64;

    /// Validates the open form and returns the request to send, or records
    /// field errors and returns `None`.
    ///
    fn prepare_submit(&mut self) -> Option<SaveRequest>;

    /// Applies a save outcome. Returns whether the list must be re-fetched.
    ///
    fn finish_save(
        &mut self,
        mode: SaveMode,
        label: &str,
        result: Result<ApiResponse, GatewayError>,
    ) -> bool;

    /// Returns the confirmed delete to send.
    ///
    fn prepare_delete(&mut self) -> Option<DeleteRequest>;

    /// Applies a delete outcome and closes the dialog either way. Returns
    /// whether the list must be re-fetched.
    ///
    fn finish_delete(&mut self, label: &str, result: Result<ApiResponse, GatewayError>) -> bool;

    /// Drops records and dialogs, and invalidates in-flight fetches.
    ///
    fn reset(&mut self);
}

impl<E: Entity> Screen for EntityScreen<E> {
    fn kind(&self) -> EntityKind {
        E::KIND
    }

    fn columns(&self) -> &'static [Column] {
        E::columns()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.list
            .paginated()
            .into_iter()
            .map(|record| {
                E::columns()
                    .iter()
                    .map(|column| record.field(column.field).to_string())
                    .collect()
            })
            .collect()
    }

    fn total_records(&self) -> usize {
        self.list.records().len()
    }

    fn filtered_count(&self) -> usize {
        self.list.filtered().len()
    }

    fn selected_index(&self) -> usize {
        self.list.selected_index()
    }

    fn selected_identity(&self) -> Option<(String, String)> {
        self.list
            .selected()
            .map(|record| (record.id().to_owned(), record.unique_value()))
    }

    fn current_page(&self) -> usize {
        self.list.current_page()
    }

    fn total_pages(&self) -> usize {
        self.list.total_pages()
    }

    fn sort(&self) -> Option<Sort> {
        self.list.sort().cloned()
    }

    fn sort_by_column(&mut self, index: usize) {
        if let Some(column) = E::columns().get(index) {
            self.list.sort_by(column.field);
        }
    }

    fn search_term(&self) -> String {
        self.list.search_term().to_owned()
    }

    fn is_searching(&self) -> bool {
        self.searching
    }

    fn set_searching(&mut self, searching: bool) {
        self.searching = searching;
    }

    fn push_search_char(&mut self, c: char) {
        let mut term = self.list.search_term().to_owned();
        term.push(c);
        self.list.set_search_term(&term);
    }

    fn pop_search_char(&mut self) {
        let mut term = self.list.search_term().to_owned();
        term.pop();
        self.list.set_search_term(&term);
    }

    fn clear_search(&mut self) {
        self.list.set_search_term("");
        self.searching = false;
    }

    fn select_next(&mut self) {
        self.list.select_next();
    }

    fn select_previous(&mut self) {
        self.list.select_previous();
    }

    fn next_page(&mut self) {
        self.list.next_page();
    }

    fn previous_page(&mut self) {
        self.list.prev_page();
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn operation_loading(&self) -> bool {
        self.operation_loading
    }

    fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn modal_view(&self) -> ModalView {
        match self.list.modal() {
            Modal::None => ModalView::None,
            Modal::Form { editing: None } => ModalView::Form {
                title: format!("Add {}", E::KIND.singular()),
            },
            Modal::Form {
                editing: Some(record),
            } => ModalView::Form {
                title: format!("Edit {} \"{}\"", E::KIND.singular(), record.unique_value()),
            },
            Modal::DeleteConfirm(record) => ModalView::DeleteConfirm {
                label: record.unique_value(),
            },
            Modal::View(record) => ModalView::View {
                details: record.details(),
            },
        }
    }

    fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    fn form_mut(&mut self) -> Option<&mut FormState> {
        self.form.as_mut()
    }

    fn open_add(&mut self, auth: &AuthContext) -> bool {
        if !self.gate(auth, Action::Create) {
            return false;
        }
        self.list.open_add();
        self.form = Some(FormState::for_add::<E>());
        true
    }

    fn open_edit(&mut self, auth: &AuthContext) -> bool {
        if !self.gate(auth, Action::Edit) {
            return false;
        }
        match self.selected_record() {
            Some(record) => {
                self.form = Some(FormState::for_edit(&record));
                self.list.open_edit(record);
                true
            }
            None => false,
        }
    }

    fn open_delete(&mut self, auth: &AuthContext) -> bool {
        if !self.gate(auth, Action::Delete) {
            return false;
        }
        match self.selected_record() {
            Some(record) => {
                self.list.open_delete(record);
                true
            }
            None => false,
        }
    }

    fn open_view(&mut self, auth: &AuthContext) -> bool {
        if !self.gate(auth, Action::View) {
            return false;
        }
        match self.selected_record() {
            Some(record) => {
                self.list.open_view(record);
                true
            }
            None => false,
        }
    }

    fn close(&mut self) {
        self.list.close_all();
        self.form = None;
    }

    fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.generation
    }

    fn prepare_submit(&mut self) -> Option<SaveRequest> {
        if self.operation_loading {
            warn!("Ignoring submit while a {} save is in flight", E::KIND.singular());
            return None;
        }
        let editing_id = match self.list.modal() {
            Modal::Form { editing } => editing.as_ref().map(|record| record.id().to_owned()),
            _ => return None,
        };
        let form = self.form.as_mut()?;
        let record = match E::from_form(editing_id.as_deref(), form.values()) {
            Ok(record) => record,
            Err(errors) => {
                debug!("{} form has {} invalid field(s)", E::KIND.singular(), errors.len());
                form.set_errors(errors);
                return None;
            }
        };

        let label = record.unique_value();
        let duplicate = self.list.records().iter().any(|existing| {
            Some(existing.id()) != editing_id.as_deref()
                && existing.unique_value().eq_ignore_ascii_case(&label)
        });
        if duplicate {
            let mut errors = crate::entity::ValidationErrors::new();
            errors.add(
                E::unique_field(),
                format!("{} \"{}\" already exists", E::KIND.singular(), label),
            );
            form.set_errors(errors);
            return None;
        }

        let mode = if editing_id.is_some() {
            SaveMode::Update
        } else {
            SaveMode::Create
        };
        self.operation_loading = true;
        Some(SaveRequest {
            kind: E::KIND,
            mode,
            payload: record.to_wire(mode),
            label,
        })
    }

    fn finish_save(
        &mut self,
        mode: SaveMode,
        label: &str,
        result: Result<ApiResponse, GatewayError>,
    ) -> bool {
        self.operation_loading = false;
        match result {
            Ok(_) => {
                let verb = match mode {
                    SaveMode::Create => "created",
                    SaveMode::Update => "updated",
                };
                info!("{} \"{}\" {}", E::KIND.singular(), label, verb);
                self.close();
                self.notice = Some(Notice::success(format!(
                    "{} {} successfully",
                    E::KIND.singular(),
                    verb
                )));
                true
            }
            Err(e) => {
                error!("Failed to save {} \"{}\": {}", E::KIND.singular(), label, e);
                self.notice = Some(Notice::error(describe_failure(E::KIND, &e, Some(label))));
                false
            }
        }
    }

    fn prepare_delete(&mut self) -> Option<DeleteRequest> {
        if self.operation_loading {
            return None;
        }
        let request = match self.list.modal() {
            Modal::DeleteConfirm(record) => DeleteRequest {
                kind: E::KIND,
                id: record.id().to_owned(),
                label: record.unique_value(),
            },
            _ => return None,
        };
        self.operation_loading = true;
        Some(request)
    }

    fn finish_delete(&mut self, label: &str, result: Result<ApiResponse, GatewayError>) -> bool {
        self.operation_loading = false;
        self.close();
        match result {
            Ok(_) => {
                info!("{} \"{}\" deleted", E::KIND.singular(), label);
                self.notice = Some(Notice::success(format!(
                    "{} deleted successfully",
                    E::KIND.singular()
                )));
                true
            }
            Err(e) => {
                error!("Failed to delete {} \"{}\": {}", E::KIND.singular(), label, e);
                self.notice = Some(Notice::error(describe_failure(E::KIND, &e, None)));
                false
            }
        }
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.list.set_records(vec![]);
        self.list.set_search_term("");
        self.close();
        self.loading = false;
        self.error = None;
        self.operation_loading = false;
        self.notice = None;
        self.searching = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{RoleKey, UserAccess};
    use crate::entity::{Country, StateProvince, Status};
    use fake::{Fake, Faker};
    use serde_json::json;

    fn auth(roles: &[RoleKey]) -> AuthContext {
        let mut auth = AuthContext::new();
        auth.sign_in(UserAccess::from_roles(
            "me",
            "operator",
            roles.iter().copied().collect(),
        ));
        auth
    }

    fn state(id: &str, name: &str) -> StateProvince {
        StateProvince {
            id: id.to_string(),
            name: name.to_string(),
            code: "TX".to_string(),
            country: "United States".to_string(),
            status: Status::Active,
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded(records: Vec<StateProvince>) -> EntityScreen<StateProvince> {
        let mut screen = EntityScreen::new(10);
        let generation = screen.begin_fetch();
        assert!(screen.finish_fetch(generation, Ok(records)));
        screen
    }

    fn fill(screen: &mut EntityScreen<StateProvince>, values: &[(&str, &str)]) {
        let form = screen.form_mut().unwrap();
        for (key, value) in values {
            while form.focused_field().map(|f| f.key) != Some(*key) {
                form.focus_next();
            }
            while !form.values().get(key).is_empty() {
                form.backspace();
            }
            for c in value.chars() {
                form.insert_char(c);
            }
        }
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut screen: EntityScreen<Country> = EntityScreen::new(10);
        let first = screen.begin_fetch();
        let second = screen.begin_fetch();
        let fresh: Vec<Country> = (0..3).map(|_| Faker.fake()).collect();
        assert!(screen.finish_fetch(second, Ok(fresh)));
        assert!(!screen.finish_fetch(first, Ok(vec![Faker.fake()])));
        assert_eq!(screen.total_records(), 3);
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_fetch_failure_sets_banner() {
        let mut screen: EntityScreen<Country> = EntityScreen::new(10);
        let generation = screen.begin_fetch();
        screen.finish_fetch(
            generation,
            Err(GatewayError::Http {
                status: 503,
                message: None,
            }),
        );
        assert_eq!(screen.error(), Some("Request failed with status 503"));
    }

    #[test]
    fn test_conflict_names_value() {
        let message = describe_failure(
            EntityKind::State,
            &GatewayError::Conflict { message: None },
            Some("Texas"),
        );
        assert!(message.contains("Texas"));
        assert!(message.contains("exists"));
        assert_eq!(message, "State \"Texas\" already exists");
    }

    #[test]
    fn test_rejected_uses_server_message() {
        let error = GatewayError::Rejected {
            status_code: Some(400),
            message: Some("Code is too long".to_string()),
        };
        assert_eq!(
            describe_failure(EntityKind::Country, &error, Some("Peru")),
            "Code is too long"
        );
    }

    #[test]
    fn test_denied_action_never_opens_modal() {
        let mut screen = loaded(vec![state("1", "Texas")]);
        let viewer = auth(&[RoleKey::Employee]);
        assert!(!screen.open_add(&viewer));
        assert!(!screen.open_delete(&viewer));
        assert_eq!(screen.modal_view(), ModalView::None);
        assert_eq!(
            screen.notice().map(|n| n.level),
            Some(NoticeLevel::Error)
        );
        assert!(screen.open_view(&viewer));
        assert!(matches!(screen.modal_view(), ModalView::View { .. }));
    }

    #[test]
    fn test_submit_validates_before_sending() {
        let mut screen = loaded(vec![]);
        assert!(screen.open_add(&auth(&[RoleKey::Admin])));
        assert!(screen.prepare_submit().is_none());
        assert!(!screen.form().unwrap().errors().is_empty());
        assert!(!screen.operation_loading());
    }

    #[test]
    fn test_duplicate_detected_in_memory() {
        let mut screen = loaded(vec![state("1", "Texas")]);
        assert!(screen.open_add(&auth(&[RoleKey::Admin])));
        fill(&mut screen, &[("name", "texas"), ("code", "TX"), ("country", "USA")]);
        assert!(screen.prepare_submit().is_none());
        let errors = screen.form().unwrap().errors();
        assert!(errors.get("name").unwrap().contains("already exists"));
    }

    #[test]
    fn test_create_round_trip() {
        let mut screen = loaded(vec![state("1", "Texas")]);
        assert!(screen.open_add(&auth(&[RoleKey::Admin])));
        fill(&mut screen, &[("name", "Ohio"), ("code", "OH"), ("country", "USA")]);
        let request = screen.prepare_submit().unwrap();
        assert_eq!(request.mode, SaveMode::Create);
        assert_eq!(request.label, "Ohio");
        assert_eq!(request.payload["stateName"], json!("Ohio"));
        assert!(screen.operation_loading());
        assert!(screen.prepare_submit().is_none());

        assert!(screen.finish_save(request.mode, &request.label, Ok(ApiResponse::default())));
        assert_eq!(screen.modal_view(), ModalView::None);
        assert!(screen.form().is_none());
        assert_eq!(screen.notice().map(|n| n.level), Some(NoticeLevel::Success));
    }

    #[test]
    fn test_edit_keeps_own_name() {
        let mut screen = loaded(vec![state("1", "Texas")]);
        assert!(screen.open_edit(&auth(&[RoleKey::Admin])));
        let request = screen.prepare_submit().unwrap();
        assert_eq!(request.mode, SaveMode::Update);
        assert_eq!(request.payload["stateId"], json!(1));
    }

    #[test]
    fn test_failed_save_keeps_form_open() {
        let mut screen = loaded(vec![]);
        assert!(screen.open_add(&auth(&[RoleKey::Admin])));
        fill(&mut screen, &[("name", "Texas"), ("code", "TX"), ("country", "USA")]);
        let request = screen.prepare_submit().unwrap();
        let refetch = screen.finish_save(
            request.mode,
            &request.label,
            Err(GatewayError::Conflict { message: None }),
        );
        assert!(!refetch);
        assert!(screen.form().is_some());
        let notice = screen.notice().unwrap();
        assert!(notice.message.contains("Texas"));
        assert!(notice.message.contains("exists"));
    }

    #[test]
    fn test_delete_closes_regardless_of_outcome() {
        let mut screen = loaded(vec![state("4", "Texas")]);
        assert!(screen.open_delete(&auth(&[RoleKey::Admin])));
        assert_eq!(
            screen.modal_view(),
            ModalView::DeleteConfirm {
                label: "Texas".to_string()
            }
        );
        let request = screen.prepare_delete().unwrap();
        assert_eq!(request.id, "4");
        let refetch = screen.finish_delete(
            &request.label,
            Err(GatewayError::Http {
                status: 500,
                message: Some("Boom".to_string()),
            }),
        );
        assert!(!refetch);
        assert_eq!(screen.modal_view(), ModalView::None);
        assert_eq!(screen.notice().unwrap().message, "Boom");
    }

    #[test]
    fn test_search_and_sort_through_screen() {
        let mut screen = loaded(vec![state("1", "Texas"), state("2", "Ohio")]);
        screen.push_search_char('o');
        screen.push_search_char('h');
        assert_eq!(screen.filtered_count(), 1);
        screen.clear_search();
        screen.sort_by_column(0);
        assert_eq!(screen.rows()[0][0], "Ohio");
        screen.sort_by_column(0);
        assert_eq!(screen.rows()[0][0], "Texas");
    }

    #[test]
    fn test_reset_invalidates_fetch() {
        let mut screen = loaded(vec![state("1", "Texas")]);
        let generation = screen.begin_fetch();
        screen.reset();
        assert!(!screen.finish_fetch(generation, Ok(vec![state("2", "Ohio")])));
        assert_eq!(screen.total_records(), 0);
    }
}
