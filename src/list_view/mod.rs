//! Client-side list view over one collection.
//!
//! Owns the collection together with its view state:
//! - search filter (case-insensitive substring over the searchable fields)
//! - sort field and direction (stable, case-insensitive)
//! - pagination clamped to the filtered page count
//! - the row cursor on the current page
//! - the modal dialog state

mod modal;

pub use modal::Modal;

use crate::entity::Record;

/// Specifying sort direction.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Current sort field and direction.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// Houses a collection and its derived table presentation.
///
#[derive(Clone, Debug)]
pub struct ListView<T> {
    records: Vec<T>,
    searchable_fields: Vec<&'static str>,
    items_per_page: usize,
    current_page: usize,
    total_pages: usize,
    sort: Option<Sort>,
    search_term: String,
    selected: usize,
    modal: Modal<T>,
}

impl<T: Record> ListView<T> {
    /// Returns an empty view. A page size of zero is treated as one.
    ///
    pub fn new(items_per_page: usize, searchable_fields: &[&'static str]) -> Self {
        ListView {
            records: vec![],
            searchable_fields: searchable_fields.to_vec(),
            items_per_page: items_per_page.max(1),
            current_page: 1,
            total_pages: 0,
            sort: None,
            search_term: String::new(),
            selected: 0,
            modal: Modal::None,
        }
    }

    /// Replaces the whole collection.
    ///
    pub fn set_records(&mut self, records: Vec<T>) -> &mut Self {
        self.records = records;
        self.recompute_total_pages();
        self
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns `ceil(filtered / items_per_page)` as of the last recompute.
    ///
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// Updates the search term, returning to the first page.
    ///
    pub fn set_search_term(&mut self, term: &str) -> &mut Self {
        self.search_term = term.to_owned();
        self.recompute_total_pages();
        self
    }

    /// Recomputes the page count from the filtered collection and returns
    /// to the first page.
    ///
    pub fn recompute_total_pages(&mut self) -> usize {
        let filtered = self.filtered().len();
        self.total_pages = (filtered + self.items_per_page - 1) / self.items_per_page;
        self.current_page = 1;
        self.selected = 0;
        self.total_pages
    }

    /// Sorts by the field, flipping the direction when it is already the
    /// sort field.
    ///
    pub fn sort_by(&mut self, field: &str) -> &mut Self {
        self.sort = Some(match self.sort.take() {
            Some(sort) if sort.field == field => Sort {
                field: sort.field,
                direction: sort.direction.flipped(),
            },
            _ => Sort {
                field: field.to_owned(),
                direction: SortDirection::Ascending,
            },
        });
        self.current_page = 1;
        self.selected = 0;
        self
    }

    /// Returns the records matching the search term in collection order.
    ///
    pub fn filtered(&self) -> Vec<&T> {
        let needle = self.search_term.to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|record| {
                self.searchable_fields
                    .iter()
                    .any(|field| record.field(field).contains_lowercase(&needle))
            })
            .collect()
    }

    /// Returns the filtered records in sort order. Ties keep filtered order.
    ///
    pub fn sorted(&self) -> Vec<&T> {
        let mut records = self.filtered();
        if let Some(sort) = &self.sort {
            records.sort_by(|a, b| {
                let ordering = a.field(&sort.field).compare(&b.field(&sort.field));
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        records
    }

    /// Returns the current page of sorted records.
    ///
    pub fn paginated(&self) -> Vec<&T> {
        let start = (self.current_page - 1) * self.items_per_page;
        self.sorted()
            .into_iter()
            .skip(start)
            .take(self.items_per_page)
            .collect()
    }

    fn last_page(&self) -> usize {
        self.total_pages.max(1)
    }

    /// Moves to the page, clamped to the available pages.
    ///
    pub fn go_to_page(&mut self, page: usize) -> &mut Self {
        self.current_page = page.clamp(1, self.last_page());
        self.selected = 0;
        self
    }

    pub fn prev_page(&mut self) -> &mut Self {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> &mut Self {
        self.go_to_page(self.current_page + 1)
    }

    /// Returns the cursor position on the current page.
    ///
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Returns the record under the cursor.
    ///
    pub fn selected(&self) -> Option<&T> {
        self.paginated().get(self.selected).copied()
    }

    pub fn select_next(&mut self) -> &mut Self {
        let rows = self.paginated().len();
        if rows > 0 && self.selected + 1 < rows {
            self.selected += 1;
        }
        self
    }

    pub fn select_previous(&mut self) -> &mut Self {
        self.selected = self.selected.saturating_sub(1);
        self
    }

    pub fn modal(&self) -> &Modal<T> {
        &self.modal
    }

    pub fn open_add(&mut self) -> &mut Self {
        self.modal = Modal::Form { editing: None };
        self
    }

    pub fn open_edit(&mut self, record: T) -> &mut Self {
        self.modal = Modal::Form {
            editing: Some(record),
        };
        self
    }

    pub fn open_delete(&mut self, record: T) -> &mut Self {
        self.modal = Modal::DeleteConfirm(record);
        self
    }

    pub fn open_view(&mut self, record: T) -> &mut Self {
        self.modal = Modal::View(record);
        self
    }

    pub fn close_all(&mut self) -> &mut Self {
        self.modal = Modal::None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::FieldValue;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: String,
        name: String,
        code: Option<String>,
    }

    impl Record for Row {
        fn id(&self) -> &str {
            &self.id
        }

        fn field(&self, name: &str) -> FieldValue {
            match name {
                "name" => FieldValue::text(&self.name),
                "code" => FieldValue::optional(self.code.as_deref()),
                _ => FieldValue::Missing,
            }
        }
    }

    fn row(id: usize, name: &str) -> Row {
        Row {
            id: id.to_string(),
            name: name.to_string(),
            code: None,
        }
    }

    fn rows(count: usize) -> Vec<Row> {
        (0..count).map(|i| row(i, &format!("Record {:02}", i))).collect()
    }

    fn view(records: Vec<Row>, items_per_page: usize) -> ListView<Row> {
        let mut view = ListView::new(items_per_page, &["name", "code"]);
        view.set_records(records);
        view
    }

    fn names(records: Vec<&Row>) -> Vec<String> {
        records.into_iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_pages_never_exceed_page_size_and_concatenate_to_sorted() {
        for count in [0, 1, 9, 10, 11, 25, 40] {
            for items_per_page in [1, 3, 10] {
                let mut view = view(rows(count), items_per_page);
                view.sort_by("name").sort_by("name");
                let mut all = vec![];
                for page in 1..=view.total_pages() {
                    view.go_to_page(page);
                    let current = view.paginated();
                    assert!(current.len() <= items_per_page);
                    all.extend(current.into_iter().cloned());
                }
                let sorted: Vec<Row> = view.sorted().into_iter().cloned().collect();
                assert_eq!(all, sorted);
            }
        }
    }

    #[test]
    fn test_twenty_five_records_make_three_pages() {
        let mut view = view(rows(25), 10);
        assert_eq!(view.total_pages(), 3);
        view.go_to_page(4);
        assert_eq!(view.current_page(), 3);
        view.next_page();
        assert_eq!(view.current_page(), 3);
        assert_eq!(view.paginated().len(), 5);
        view.go_to_page(0);
        assert_eq!(view.current_page(), 1);
        view.prev_page();
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_empty_collection_stays_on_first_page() {
        let mut view = view(vec![], 10);
        assert_eq!(view.total_pages(), 0);
        view.next_page();
        assert_eq!(view.current_page(), 1);
        assert!(view.paginated().is_empty());
        assert!(view.selected().is_none());
    }

    #[test]
    fn test_sort_twice_reverses() {
        let records = vec![row(1, "beta"), row(2, "Alpha"), row(3, "gamma")];
        let mut view = view(records, 10);
        view.sort_by("name");
        let ascending = names(view.sorted());
        assert_eq!(ascending, vec!["Alpha", "beta", "gamma"]);
        view.sort_by("name");
        let mut descending = names(view.sorted());
        descending.reverse();
        assert_eq!(descending, ascending);
        assert_eq!(
            view.sort().map(|s| s.direction),
            Some(SortDirection::Descending)
        );
    }

    #[test]
    fn test_new_field_resets_to_ascending() {
        let mut view = view(rows(3), 10);
        view.sort_by("name").sort_by("name");
        view.sort_by("code");
        assert_eq!(
            view.sort(),
            Some(&Sort {
                field: "code".to_string(),
                direction: SortDirection::Ascending
            })
        );
        view.sort_by("name");
        assert_eq!(
            view.sort().map(|s| s.direction),
            Some(SortDirection::Ascending)
        );
    }

    #[test]
    fn test_sort_resets_page() {
        let mut view = view(rows(25), 10);
        view.go_to_page(3);
        view.sort_by("name");
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_sort_is_stable_and_missing_sorts_low() {
        let mut records = vec![row(1, "same"), row(2, "same"), row(3, "same")];
        records[1].code = Some("B".to_string());
        records[2].code = Some("a".to_string());
        let mut view = view(records, 10);
        view.sort_by("code");
        let ids: Vec<&str> = view.sorted().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "2"]);

        view.sort_by("unknown");
        let ids: Vec<&str> = view.sorted().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = vec![row(1, "Texas"), row(2, "Alaska"), row(3, "Nevada")];
        let mut view = view(records, 10);
        view.set_search_term("AS");
        assert_eq!(names(view.filtered()), vec!["Texas", "Alaska"]);
        view.set_search_term("txs");
        assert!(view.filtered().is_empty());
    }

    #[test]
    fn test_clearing_search_restores_collection() {
        let mut view = view(rows(25), 10);
        view.set_search_term("Record 1");
        assert_eq!(view.filtered().len(), 10);
        assert_eq!(view.total_pages(), 1);
        view.set_search_term("");
        assert_eq!(view.filtered().len(), 25);
        assert_eq!(view.total_pages(), 3);
    }

    #[test]
    fn test_search_resets_page() {
        let mut view = view(rows(25), 10);
        view.go_to_page(2);
        view.set_search_term("Record");
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut view = view(rows(25), 10);
        view.go_to_page(2);
        let first = view.recompute_total_pages();
        assert_eq!(view.current_page(), 1);
        view.next_page();
        let second = view.recompute_total_pages();
        assert_eq!(first, second);
        let third = view.recompute_total_pages();
        assert_eq!(third, first);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_cursor_is_bounded_by_page() {
        let mut view = view(rows(12), 10);
        view.next_page();
        view.select_next().select_next().select_next();
        assert_eq!(view.selected_index(), 1);
        assert_eq!(view.selected().map(|r| r.id.as_str()), Some("11"));
        view.select_previous().select_previous();
        assert_eq!(view.selected_index(), 0);
    }

    #[test]
    fn test_modal_transitions_are_exclusive() {
        let mut view = view(rows(2), 10);
        let first = view.records()[0].clone();
        view.open_add();
        assert_eq!(view.modal(), &Modal::Form { editing: None });
        view.open_edit(first.clone());
        assert_eq!(view.modal().editing(), Some(&first));
        view.open_delete(first.clone());
        assert_eq!(view.modal(), &Modal::DeleteConfirm(first.clone()));
        view.open_view(first.clone());
        assert_eq!(view.modal(), &Modal::View(first));
        view.close_all();
        assert!(!view.modal().is_open());
    }
}
