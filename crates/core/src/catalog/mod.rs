//! Game catalog: fixture loading, localisation and the query pipeline.

/// Fixture loading and facet derivation.
pub mod loader;
/// Game records and localisation lookup.
pub mod models;
/// Filter, sort and paginate.
pub mod query;

pub use loader::{CatalogFacets, CatalogSource, CatalogStore};
pub use models::{Game, LocaleKey, LocaleSource, Localised};
pub use query::{
    filter, paginate, run_query, sort, CatalogQuery, FilterCriteria, Page, SortField, SortOrder,
    UnknownSortOption,
};
