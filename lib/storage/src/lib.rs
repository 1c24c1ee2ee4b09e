//! Document store seam for ragshelf.
//!
//! [`DocumentStore`] is what the retrieval pipeline queries;
//! [`InMemoryCatalog`] is the bundled implementation, loaded from a JSON
//! file with [`load_catalog`]. [`CandidateFilter`] turns criteria into a
//! store query and drops malformed entries.

pub mod candidates;
pub mod catalog;
pub mod loader;

pub use candidates::CandidateFilter;
pub use catalog::{DocumentStore, InMemoryCatalog};
pub use loader::{load_catalog, parse_catalog};
