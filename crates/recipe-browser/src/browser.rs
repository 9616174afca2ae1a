//! The browser state container.
//!
//! [`Browser`] holds everything that decides what is fetched and shown:
//! draft and active filters, pagination, the result view and the recipe
//! selected for detail. Every change goes through [`Browser::dispatch`], and
//! the descriptor to fetch is always rebuilt from scratch by
//! [`query::build`](crate::query::build).

use std::fmt;
use std::str::FromStr;

use recipe_api_rs::models::{PageResult, Recipe};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BrowserError, FetchFailure, Result};
use crate::filter::FilterField;
use crate::pagination::{Pagination, DEFAULT_PAGE_SIZE};
use crate::query::{self, FilterInputs, QueryDescriptor};
use crate::view::{ListView, ViewState};

/// When filter edits take effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerPolicy {
    /// Every edit is applied at once.
    #[default]
    Immediate,
    /// Edits collect in a draft until [`Action::Apply`].
    Explicit,
}

impl TriggerPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerPolicy::Immediate => "immediate",
            TriggerPolicy::Explicit => "explicit",
        }
    }
}

impl fmt::Display for TriggerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerPolicy {
    type Err = BrowserError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "immediate" => Ok(TriggerPolicy::Immediate),
            "explicit" => Ok(TriggerPolicy::Explicit),
            _ => Err(BrowserError::InvalidTrigger {
                value: s.to_string(),
            }),
        }
    }
}

/// A user-driven state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the text of one filter field.
    SetFilter(FilterField, String),
    /// Commit the draft filters.
    Apply,
    /// Empty all filters.
    Clear,
    /// Change the page size.
    SetLimit(u32),
    /// Jump to a page (clamped).
    SetPage(u32),
    First,
    Prev,
    Next,
    Last,
    /// Select the recipe at a 1-based row for detail.
    Open(usize),
    /// Select the recipe with this id for detail.
    OpenId(u64),
    /// Close the detail panel.
    Close,
}

/// Outcome of showing a page result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// The rows are on screen.
    Shown,
    /// The requested page no longer exists; the page was clamped and the
    /// new descriptor must be fetched.
    PageClamped,
}

/// Filters, pagination, result view and detail selection.
#[derive(Debug, Clone)]
pub struct Browser {
    trigger: TriggerPolicy,
    draft: FilterInputs,
    active: FilterInputs,
    pagination: Pagination,
    view: ListView,
    selected: Option<Recipe>,
}

impl Default for Browser {
    fn default() -> Self {
        Self::new(TriggerPolicy::default(), DEFAULT_PAGE_SIZE)
    }
}

impl Browser {
    /// Creates a browser on page 1 with no filters.
    ///
    /// An invalid `limit` falls back to the default page size.
    pub fn new(trigger: TriggerPolicy, limit: u32) -> Self {
        Self {
            trigger,
            draft: FilterInputs::new(),
            active: FilterInputs::new(),
            pagination: Pagination::new(limit),
            view: ListView::new(),
            selected: None,
        }
    }

    pub fn trigger(&self) -> TriggerPolicy {
        self.trigger
    }

    /// Filter text as typed, including unapplied edits.
    pub fn draft(&self) -> &FilterInputs {
        &self.draft
    }

    /// Filter text that the current descriptor is built from.
    pub fn active(&self) -> &FilterInputs {
        &self.active
    }

    /// Returns true if the draft differs from the applied filters.
    pub fn has_unapplied_edits(&self) -> bool {
        self.draft.normalized() != self.active.normalized()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// Current list state.
    pub fn state(&self) -> ViewState<'_> {
        self.view.state()
    }

    /// The recipe shown in the detail panel.
    pub fn selected(&self) -> Option<&Recipe> {
        self.selected.as_ref()
    }

    /// The descriptor for the current filters and page.
    pub fn descriptor(&self) -> QueryDescriptor {
        query::build(&self.pagination, &self.active)
    }

    /// Applies one transition.
    ///
    /// Filter and page-size changes go back to page 1. Navigation past either
    /// end is ignored. Returns an error only for input that cannot be
    /// applied at all; the state is unchanged in that case.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        debug!(?action, "dispatch");
        match action {
            Action::SetFilter(field, text) => self.set_filter(field, text),
            Action::Apply => self.apply_draft(),
            Action::Clear => {
                self.draft.clear();
                self.commit(FilterInputs::new());
            }
            Action::SetLimit(limit) => {
                self.pagination.set_limit(limit)?;
            }
            Action::SetPage(n) => {
                self.pagination.set_page(n);
            }
            Action::First => {
                self.pagination.first();
            }
            Action::Prev => {
                self.pagination.prev();
            }
            Action::Next => {
                self.pagination.next();
            }
            Action::Last => {
                self.pagination.last();
            }
            Action::Open(row) => {
                self.selected = Some(self.view.row(row)?.clone());
            }
            Action::OpenId(id) => {
                self.selected = Some(self.view.find(id)?.clone());
            }
            Action::Close => self.selected = None,
        }
        Ok(())
    }

    fn set_filter(&mut self, field: FilterField, text: String) {
        self.draft.set(field, text);
        if self.trigger == TriggerPolicy::Immediate {
            self.commit(self.draft.clone());
        }
    }

    fn apply_draft(&mut self) {
        self.draft = self.draft.trimmed();
        self.commit(self.draft.clone());
    }

    /// Makes `inputs` the active filters, going back to page 1 on any edit.
    ///
    /// An edit that normalizes to the same filters still resets the page;
    /// the coordinator skips the fetch if the descriptor did not change.
    fn commit(&mut self, inputs: FilterInputs) {
        let changed = inputs != self.active;
        self.active = inputs;
        if changed {
            self.pagination.reset_page();
        }
    }

    /// Marks a request for the current descriptor as outstanding.
    pub fn begin_loading(&mut self) {
        self.view.begin_loading();
    }

    /// Reconciles a successful response for `descriptor`.
    ///
    /// The result count updates pagination. The page size is the one that
    /// was requested; a different `limit` echoed by the server is ignored. If
    /// the count clamps the page below the one requested, the rows are not
    /// shown and the view stays loading.
    pub fn show_result(&mut self, descriptor: &QueryDescriptor, page: PageResult) -> Reconciled {
        let clamped = self.pagination.advance(page.total, descriptor.limit());
        if clamped != descriptor.page() {
            debug!(
                requested = descriptor.page(),
                clamped,
                total = page.total,
                "requested page out of range"
            );
            self.view.begin_loading();
            return Reconciled::PageClamped;
        }
        self.view.show(page);
        Reconciled::Shown
    }

    /// Reconciles a failed request. Shown rows are cleared.
    pub fn show_failure(&mut self, failure: FetchFailure) {
        self.view.fail(failure);
    }
}
