//! Filter fields and the operator-expression codec.
//!
//! Five filter fields exist. `title` and `cuisine` are substring text
//! filters; `rating`, `total_time` and `calories` are comparison filters
//! written as an optional operator followed by a value.
//!
//! # Supported Syntax
//!
//! - `>=4.5` - greater than or equal
//! - `<=60` - less than or equal
//! - `>3` - greater than
//! - `<400` - less than
//! - `=400` or bare `400` - equal
//!
//! The codec never validates the value; the remote endpoint rejects
//! malformed numbers.
//!
//! # Example
//!
//! ```
//! use recipe_browser_rs::filter::{Comparison, FilterField, NormalizedFilter, Operator};
//!
//! let c = Comparison::parse(">= 4.5").unwrap();
//! assert_eq!(c.operator(), Operator::Ge);
//! assert_eq!(c.value(), "4.5");
//! assert_eq!(c.serialize(), ">=4.5");
//!
//! assert!(Comparison::parse("   ").is_none());
//!
//! let f = NormalizedFilter::parse(FilterField::Rating, "4").unwrap();
//! assert_eq!(f.serialize(), "=4");
//! ```

mod codec;
mod error;
mod field;

pub use codec::{Comparison, NormalizedFilter, Operator};
pub use error::{FilterError, FilterResult};
pub use field::FilterField;
