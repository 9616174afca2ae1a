//! The filterable recipe fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{FilterError, FilterResult};

/// A recipe field that can be filtered on.
///
/// The declaration order is the canonical order used when filters are
/// collected into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    /// Substring match on the title.
    Title,
    /// Substring match on the cuisine.
    Cuisine,
    /// Comparison on the rating.
    Rating,
    /// Comparison on the total time in minutes.
    TotalTime,
    /// Comparison on the calorie count.
    Calories,
}

impl FilterField {
    /// All fields in canonical order.
    pub const ALL: [FilterField; 5] = [
        FilterField::Title,
        FilterField::Cuisine,
        FilterField::Rating,
        FilterField::TotalTime,
        FilterField::Calories,
    ];

    /// The query-string parameter name for this field.
    pub fn param(self) -> &'static str {
        match self {
            FilterField::Title => "title",
            FilterField::Cuisine => "cuisine",
            FilterField::Rating => "rating",
            FilterField::TotalTime => "total_time",
            FilterField::Calories => "calories",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Title => "Title",
            FilterField::Cuisine => "Cuisine",
            FilterField::Rating => "Rating",
            FilterField::TotalTime => "Total time",
            FilterField::Calories => "Calories",
        }
    }

    /// Returns true for fields that take an operator expression.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            FilterField::Rating | FilterField::TotalTime | FilterField::Calories
        )
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

impl FromStr for FilterField {
    type Err = FilterError;

    /// Parses a field name case-insensitively. Besides the parameter names,
    /// `total-time`, `time` and `kcal` are accepted.
    fn from_str(s: &str) -> FilterResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(FilterField::Title),
            "cuisine" => Ok(FilterField::Cuisine),
            "rating" => Ok(FilterField::Rating),
            "total_time" | "total-time" | "time" => Ok(FilterField::TotalTime),
            "calories" | "kcal" => Ok(FilterField::Calories),
            _ => Err(FilterError::unknown_field(s.trim())),
        }
    }
}
