//! Reconciles fetch results into what the list shows.

use recipe_api_rs::models::{PageResult, Recipe};

use crate::error::{BrowserError, FetchFailure, Result};

/// The one thing the list shows at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewState<'a> {
    /// A request is outstanding.
    Loading,
    /// The last request failed with this message.
    Error(&'a str),
    /// The last request succeeded with no rows.
    Empty,
    /// The rows of the last successful request.
    Rows(&'a [Recipe]),
}

/// Result list state: loading flag, last failure and last page.
///
/// [`state`](Self::state) resolves these to a single [`ViewState`] with
/// loading taking precedence over an error, and an error over data.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    loading: bool,
    failure: Option<FetchFailure>,
    page: Option<PageResult>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a request as outstanding.
    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Shows a successful page, replacing whatever was shown.
    pub fn show(&mut self, page: PageResult) {
        self.loading = false;
        self.failure = None;
        self.page = Some(page);
    }

    /// Shows a failure. Previously shown rows are cleared.
    pub fn fail(&mut self, failure: FetchFailure) {
        self.loading = false;
        self.failure = Some(failure);
        self.page = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last failure, if the last request failed.
    pub fn failure(&self) -> Option<&FetchFailure> {
        self.failure.as_ref()
    }

    /// The last successful page, if any.
    pub fn page(&self) -> Option<&PageResult> {
        self.page.as_ref()
    }

    /// Rows of the last successful page, empty after a failure.
    pub fn rows(&self) -> &[Recipe] {
        self.page
            .as_ref()
            .map(|p| p.data.as_slice())
            .unwrap_or_default()
    }

    /// Returns the recipe at 1-based `row`.
    pub fn row(&self, row: usize) -> Result<&Recipe> {
        let rows = self.rows();
        row.checked_sub(1)
            .and_then(|i| rows.get(i))
            .ok_or(BrowserError::NoSuchRow {
                row,
                rows: rows.len(),
            })
    }

    /// Returns the recipe with `id` on the current page.
    pub fn find(&self, id: u64) -> Result<&Recipe> {
        self.rows()
            .iter()
            .find(|r| r.id == id)
            .ok_or(BrowserError::NoSuchRecipe { id })
    }

    /// Resolves the current state.
    pub fn state(&self) -> ViewState<'_> {
        if self.loading {
            return ViewState::Loading;
        }
        if let Some(failure) = &self.failure {
            return ViewState::Error(failure.message());
        }
        match self.rows() {
            [] => ViewState::Empty,
            rows => ViewState::Rows(rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(titles: &[&str]) -> PageResult {
        PageResult {
            page: 1,
            limit: 15,
            total: titles.len() as u64,
            total_pages: None,
            data: titles
                .iter()
                .enumerate()
                .map(|(i, t)| Recipe {
                    id: 10 + i as u64,
                    title: t.to_string(),
                    ..Recipe::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_initial_state_is_empty() {
        assert_eq!(ListView::new().state(), ViewState::Empty);
    }

    #[test]
    fn test_loading_takes_precedence() {
        let mut view = ListView::new();
        view.show(page(&["Pie"]));
        view.begin_loading();
        assert_eq!(view.state(), ViewState::Loading);

        view.fail(FetchFailure::new("HTTP error 500: boom"));
        view.begin_loading();
        assert_eq!(view.state(), ViewState::Loading);
    }

    #[test]
    fn test_rows_and_empty_are_distinct() {
        let mut view = ListView::new();
        view.show(page(&[]));
        assert_eq!(view.state(), ViewState::Empty);

        view.show(page(&["Pie", "Soup"]));
        match view.state() {
            ViewState::Rows(rows) => assert_eq!(rows.len(), 2),
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_clears_rows() {
        let mut view = ListView::new();
        view.show(page(&["Pie"]));
        view.fail(FetchFailure::new("Network error: refused"));

        assert_eq!(view.state(), ViewState::Error("Network error: refused"));
        assert!(view.rows().is_empty());
        assert!(view.page().is_none());
    }

    #[test]
    fn test_success_clears_failure() {
        let mut view = ListView::new();
        view.fail(FetchFailure::new("oops"));
        view.show(page(&["Pie"]));
        assert!(view.failure().is_none());
        assert!(matches!(view.state(), ViewState::Rows(_)));
    }

    #[test]
    fn test_row_lookup() {
        let mut view = ListView::new();
        view.show(page(&["Pie", "Soup"]));

        assert_eq!(view.row(2).unwrap().title, "Soup");
        assert_eq!(
            view.row(0).unwrap_err(),
            BrowserError::NoSuchRow { row: 0, rows: 2 }
        );
        assert_eq!(
            view.row(3).unwrap_err(),
            BrowserError::NoSuchRow { row: 3, rows: 2 }
        );
        assert_eq!(view.find(10).unwrap().title, "Pie");
        assert_eq!(
            view.find(99).unwrap_err(),
            BrowserError::NoSuchRecipe { id: 99 }
        );
    }
}
