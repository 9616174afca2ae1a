//! Parsing and serialization of operator expressions.

use std::fmt;

use serde::Serialize;

use super::field::FilterField;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `=`
    #[serde(rename = "=")]
    Eq,
}

impl Operator {
    /// Operators in the order they are tried against input. Two-character
    /// tokens come first so `>=` is never read as `>` followed by `=4`.
    pub const PARSE_ORDER: [Operator; 5] = [
        Operator::Ge,
        Operator::Le,
        Operator::Gt,
        Operator::Lt,
        Operator::Eq,
    ];

    /// The operator token.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Eq => "=",
        }
    }

    /// Splits a leading operator token off `text`.
    ///
    /// Returns `=` and the whole input when no token is present.
    pub fn split(text: &str) -> (Operator, &str) {
        for op in Self::PARSE_ORDER {
            if let Some(rest) = text.strip_prefix(op.as_str()) {
                return (op, rest);
            }
        }
        (Operator::Eq, text)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operator and the text it compares against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Comparison {
    operator: Operator,
    value: String,
}

impl Comparison {
    /// Creates a comparison. Surrounding whitespace in `value` is dropped.
    pub fn new(operator: Operator, value: impl AsRef<str>) -> Self {
        Self {
            operator,
            value: value.as_ref().trim().to_string(),
        }
    }

    /// Parses an operator expression such as `>=4.5`, `< 60` or `400`.
    ///
    /// Returns `None` when the input is empty or whitespace only, meaning
    /// "no filter". Anything else is accepted as-is.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let (operator, rest) = Operator::split(trimmed);
        Some(Self::new(operator, rest))
    }

    /// The operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The value text, without the operator.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Operator concatenated with value, the form sent to the search endpoint.
    pub fn serialize(&self) -> String {
        format!("{}{}", self.operator, self.value)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.value)
    }
}

/// A filter on one field in canonical form.
///
/// Text fields always carry [`Operator::Eq`] and their trimmed input as the
/// value; comparison fields carry the parsed operator expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedFilter {
    field: FilterField,
    #[serde(flatten)]
    comparison: Comparison,
}

impl NormalizedFilter {
    /// Normalizes the raw input for `field`.
    ///
    /// Returns `None` for blank input so the field is left out of the query.
    pub fn parse(field: FilterField, text: &str) -> Option<Self> {
        let comparison = if field.is_comparison() {
            Comparison::parse(text)?
        } else {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            Comparison::new(Operator::Eq, trimmed)
        };
        Some(Self { field, comparison })
    }

    /// The filtered field.
    pub fn field(&self) -> FilterField {
        self.field
    }

    /// The operator (always `=` for text fields).
    pub fn operator(&self) -> Operator {
        self.comparison.operator()
    }

    /// The value text.
    pub fn value(&self) -> &str {
        self.comparison.value()
    }

    /// The comparison part of this filter.
    pub fn comparison(&self) -> &Comparison {
        &self.comparison
    }

    /// The query parameter value.
    ///
    /// Comparison fields embed the operator (`>=4.5`); text fields send the
    /// value alone.
    pub fn serialize(&self) -> String {
        if self.field.is_comparison() {
            self.comparison.serialize()
        } else {
            self.comparison.value().to_string()
        }
    }
}
