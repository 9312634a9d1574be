//! Backend-agnostic filter expressions for document stores.
//!
//! A filter is a nested mapping (or sequence of mappings) whose keys are
//! logical operators (`$and`, `$or`, `$not`), comparison operators (`$eq`,
//! `$ne`, `$in`, `$nin`, `$gt`, `$gte`, `$lt`, `$lte`) or field names. Field
//! clauses without an explicit operator default to `$eq` for scalars and
//! `$in` for lists, and sibling conditions are implicitly AND-ed:
//!
//! ```json
//! {
//!     "$and": {
//!         "type": { "$eq": "article" },
//!         "date": { "$gte": "2015-01-01", "$lt": "2021-01-01" },
//!         "rating": { "$gte": 3 },
//!         "$or": {
//!             "genre": { "$in": ["economy", "politics"] },
//!             "publisher": { "$eq": "nytimes" }
//!         }
//!     }
//! }
//! ```
//!
//! A sequence of mappings as the operand of `$or` expresses alternatives;
//! each alternative bundles its own conditions under an explicit `$and`
//! (without it, the conditions of every mapping would flatten into one
//! operand list):
//!
//! ```json
//! {
//!     "$or": [
//!         { "$and": { "type": "news", "date": { "$lt": "2019-01-01" } } },
//!         { "$and": { "type": "blog", "date": { "$gte": "2019-01-01" } } }
//!     ]
//! }
//! ```
//!
//! [`FilterExpr::parse`] turns such a document into an expression tree that
//! the backend crates translate into native query documents. The tree is
//! immutable; [`FilterExpr::invert`] produces the negated, NOT-free
//! counterpart needed by backends without a negation operator.

pub mod error;
pub mod expr;
pub mod value;

mod parse;

pub use error::FilterError;
pub use expr::*;
pub use value::*;
