//! Faceted query building and request coordination for browsing recipes.
//!
//! This crate turns free-form filter input and a page cursor into requests
//! against the recipe API, and keeps the displayed result consistent with
//! the most recent request no matter in which order responses arrive.
//!
//! - [`filter`] parses and serializes operator expressions (`>=4.5`, `<60`).
//! - [`query`] builds the comparable [`QueryDescriptor`] and picks the
//!   listing or search endpoint.
//! - [`pagination`] keeps the page inside `[1, total_pages]`.
//! - [`coordinator`] supersedes in-flight requests and drops stale results.
//! - [`view`] maps a result to loading, error, empty or rows.
//! - [`browser`] and [`session`] tie it together.
//!
//! # Example
//!
//! ```no_run
//! use recipe_api_rs::client::RecipeClient;
//! use recipe_browser_rs::{Action, Browser, FilterField, Session, TriggerPolicy, ViewState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RecipeClient::new()?;
//!     let mut session = Session::new(Browser::new(TriggerPolicy::Immediate, 15), client);
//!
//!     session.dispatch(Action::SetFilter(FilterField::Rating, ">=4.5".into()))?;
//!     session.run_until_idle().await;
//!
//!     if let ViewState::Rows(rows) = session.browser().state() {
//!         for recipe in rows {
//!             println!("{}", recipe.title);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod coordinator;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod session;
pub mod view;

pub use browser::{Action, Browser, Reconciled, TriggerPolicy};
pub use coordinator::{RecipeSource, RequestCoordinator, Settled};
pub use error::{BrowserError, FetchFailure, Result};
pub use filter::{Comparison, FilterError, FilterField, NormalizedFilter, Operator};
pub use pagination::{is_valid_page_size, Pagination, DEFAULT_PAGE_SIZE, PAGE_SIZES};
pub use query::{Endpoint, FilterInputs, QueryDescriptor};
pub use session::Session;
pub use view::{ListView, ViewState};
