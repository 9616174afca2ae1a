//! Query descriptors and the query builder.
//!
//! A [`QueryDescriptor`] is the comparable description of what should be
//! fetched. It is rebuilt from scratch on every edit by [`build`]; two
//! descriptors compare equal exactly when they would produce the same
//! request.

use recipe_api_rs::client::{LIST_ENDPOINT, SEARCH_ENDPOINT};
use recipe_api_rs::models::SearchParams;
use serde::Serialize;

use crate::filter::{FilterField, NormalizedFilter};
use crate::pagination::Pagination;

/// Raw text of the five filter inputs, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterInputs {
    pub title: String,
    pub cuisine: String,
    pub rating: String,
    pub total_time: String,
    pub calories: String,
}

impl FilterInputs {
    /// Creates empty inputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw text for `field`.
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Title => &self.title,
            FilterField::Cuisine => &self.cuisine,
            FilterField::Rating => &self.rating,
            FilterField::TotalTime => &self.total_time,
            FilterField::Calories => &self.calories,
        }
    }

    fn slot(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Title => &mut self.title,
            FilterField::Cuisine => &mut self.cuisine,
            FilterField::Rating => &mut self.rating,
            FilterField::TotalTime => &mut self.total_time,
            FilterField::Calories => &mut self.calories,
        }
    }

    /// Replaces the text for `field`. Returns true if it changed.
    pub fn set(&mut self, field: FilterField, text: impl Into<String>) -> bool {
        let text = text.into();
        let slot = self.slot(field);
        if *slot == text {
            return false;
        }
        *slot = text;
        true
    }

    /// Empties every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns a copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        let mut out = Self::default();
        for field in FilterField::ALL {
            *out.slot(field) = self.get(field).trim().to_string();
        }
        out
    }

    /// Returns true if no field would produce a filter.
    pub fn is_blank(&self) -> bool {
        self.normalized().is_empty()
    }

    /// Normalizes each field, dropping the blank ones.
    pub fn normalized(&self) -> Vec<NormalizedFilter> {
        FilterField::ALL
            .iter()
            .filter_map(|&field| NormalizedFilter::parse(field, self.get(field)))
            .collect()
    }
}

/// Which remote endpoint a descriptor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Unfiltered paged listing.
    Listing,
    /// Filtered paged search.
    Search,
}

impl Endpoint {
    /// Path relative to the API base.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Listing => LIST_ENDPOINT,
            Endpoint::Search => SEARCH_ENDPOINT,
        }
    }
}

/// What should currently be fetched.
///
/// Holds at most one filter per field, kept in field order, so comparing two
/// descriptors compares their filter sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QueryDescriptor {
    page: u32,
    limit: u32,
    filters: Vec<NormalizedFilter>,
}

impl QueryDescriptor {
    /// Creates a descriptor. `page` is raised to 1 if zero; a later filter
    /// on the same field replaces an earlier one.
    pub fn new(page: u32, limit: u32, filters: impl IntoIterator<Item = NormalizedFilter>) -> Self {
        let mut filters: Vec<NormalizedFilter> = filters.into_iter().collect();
        filters.reverse();
        filters.sort_by_key(NormalizedFilter::field);
        filters.dedup_by_key(|f| f.field());
        Self {
            page: page.max(1),
            limit,
            filters,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Active filters in field order.
    pub fn filters(&self) -> &[NormalizedFilter] {
        &self.filters
    }

    /// Returns the filter on `field`, if any.
    pub fn filter(&self, field: FilterField) -> Option<&NormalizedFilter> {
        self.filters.iter().find(|f| f.field() == field)
    }

    /// The endpoint this descriptor must be sent to.
    ///
    /// Any filter at all routes to search.
    pub fn endpoint(&self) -> Endpoint {
        if self.filters.is_empty() {
            Endpoint::Listing
        } else {
            Endpoint::Search
        }
    }

    /// The same query on a different page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Converts to the parameters sent to the search endpoint.
    ///
    /// Fields without a filter stay `None` and are left out of the query.
    pub fn to_search_params(&self) -> SearchParams {
        let mut params = SearchParams::new(self.page, self.limit);
        for filter in &self.filters {
            let value = Some(filter.serialize());
            match filter.field() {
                FilterField::Title => params.title = value,
                FilterField::Cuisine => params.cuisine = value,
                FilterField::Rating => params.rating = value,
                FilterField::TotalTime => params.total_time = value,
                FilterField::Calories => params.calories = value,
            }
        }
        params
    }
}

/// Builds the descriptor for the given pagination and filter inputs.
///
/// Pure and deterministic: equal inputs always give equal descriptors.
pub fn build(pagination: &Pagination, inputs: &FilterInputs) -> QueryDescriptor {
    QueryDescriptor::new(pagination.page(), pagination.limit(), inputs.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Operator;

    /// The query string as it goes on the wire.
    fn query_string(d: &QueryDescriptor) -> String {
        serde_urlencoded::to_string(d.to_search_params()).unwrap()
    }

    fn inputs(pairs: &[(FilterField, &str)]) -> FilterInputs {
        let mut i = FilterInputs::new();
        for (field, text) in pairs {
            i.set(*field, *text);
        }
        i
    }

    #[test]
    fn test_no_filters_routes_to_listing() {
        let d = build(&Pagination::default(), &FilterInputs::new());
        assert_eq!(d.endpoint(), Endpoint::Listing);
        assert_eq!(d.endpoint().path(), "/recipes");
        assert_eq!(query_string(&d), "page=1&limit=15");
    }

    #[test]
    fn test_single_text_filter_routes_to_search() {
        let d = build(
            &Pagination::default(),
            &inputs(&[(FilterField::Title, "pie")]),
        );
        assert_eq!(d.endpoint(), Endpoint::Search);
        assert_eq!(d.endpoint().path(), "/recipes/search");
    }

    #[test]
    fn test_blank_fields_route_to_listing() {
        let d = build(
            &Pagination::default(),
            &inputs(&[(FilterField::Title, "   "), (FilterField::Rating, "")]),
        );
        assert_eq!(d.endpoint(), Endpoint::Listing);
        assert!(d.filters().is_empty());
    }

    #[test]
    fn test_blank_field_absent_from_query() {
        let d = build(
            &Pagination::default(),
            &inputs(&[(FilterField::Cuisine, " "), (FilterField::Calories, "<400")]),
        );
        assert_eq!(query_string(&d), "calories=%3C400&page=1&limit=15");
    }

    #[test]
    fn test_query_string_encodes_operators() {
        let d = build(
            &Pagination::default(),
            &inputs(&[(FilterField::Rating, ">=4.5")]),
        );
        assert_eq!(query_string(&d), "rating=%3E%3D4.5&page=1&limit=15");
    }

    #[test]
    fn test_filters_in_field_order() {
        let d = build(
            &Pagination::default(),
            &inputs(&[
                (FilterField::Calories, "400"),
                (FilterField::Title, "soup"),
                (FilterField::TotalTime, "<=30"),
            ]),
        );
        let fields: Vec<FilterField> = d.filters().iter().map(NormalizedFilter::field).collect();
        assert_eq!(
            fields,
            vec![FilterField::Title, FilterField::TotalTime, FilterField::Calories]
        );
        assert_eq!(
            query_string(&d),
            "title=soup&total_time=%3C%3D30&calories=%3D400&page=1&limit=15"
        );
    }

    #[test]
    fn test_descriptor_equality() {
        let p = Pagination::default();
        let a = build(&p, &inputs(&[(FilterField::Rating, ">= 4.5")]));
        let b = build(&p, &inputs(&[(FilterField::Rating, ">=4.5 ")]));
        assert_eq!(a, b);

        let c = build(&p, &inputs(&[(FilterField::Rating, ">4.5")]));
        assert_ne!(a, c);
        assert_ne!(a, a.with_page(2));
    }

    #[test]
    fn test_new_dedups_by_field_keeping_last() {
        let first = NormalizedFilter::parse(FilterField::Rating, ">=3").unwrap();
        let second = NormalizedFilter::parse(FilterField::Rating, ">=4").unwrap();
        let d = QueryDescriptor::new(0, 15, vec![first, second]);
        assert_eq!(d.page(), 1);
        assert_eq!(d.filters().len(), 1);
        assert_eq!(d.filter(FilterField::Rating).unwrap().value(), "4");
        assert_eq!(
            d.filter(FilterField::Rating).unwrap().operator(),
            Operator::Ge
        );
    }

    #[test]
    fn test_to_search_params() {
        let d = build(
            &Pagination::default(),
            &inputs(&[
                (FilterField::Cuisine, "Italian"),
                (FilterField::TotalTime, "< 60"),
            ]),
        );
        let params = d.to_search_params();
        assert_eq!(params.cuisine.as_deref(), Some("Italian"));
        assert_eq!(params.total_time.as_deref(), Some("<60"));
        assert_eq!(params.title, None);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 15);
    }

    #[test]
    fn test_filter_inputs_trimmed_and_clear() {
        let mut i = inputs(&[(FilterField::Title, "  pie "), (FilterField::Rating, " 4 ")]);
        let t = i.trimmed();
        assert_eq!(t.title, "pie");
        assert_eq!(t.rating, "4");
        assert!(!i.is_blank());

        i.clear();
        assert!(i.is_blank());
        assert_eq!(i, FilterInputs::default());
    }

    #[test]
    fn test_filter_inputs_set_reports_change() {
        let mut i = FilterInputs::new();
        assert!(i.set(FilterField::Cuisine, "thai"));
        assert!(!i.set(FilterField::Cuisine, "thai"));
        assert_eq!(i.get(FilterField::Cuisine), "thai");
    }
}
