//! Search module.
//!
//! Contains the category filter, sort keys and the catalog projection.

mod filter;
mod query;
mod results;

pub use filter::CategoryFilter;
pub use query::{project, CatalogQuery, SortKey};
pub use results::{category_facets, FacetValue};
