//! Data types exchanged with the recipe API.
//!
//! [`Recipe`] is the catalog record, [`PageResult`] wraps one page of
//! recipes from either the listing or the search endpoint, and
//! [`SearchParams`] is the typed form of the search endpoint's query string.

mod page;
mod recipe;

pub use page::*;
pub use recipe::*;
