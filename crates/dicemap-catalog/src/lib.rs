//! Dicemap — region data model and catalog construction.
//!
//! Responsible for turning already-tokenized CSV rows into the immutable
//! list of [`domain::region::Region`]s a game session narrows down. Rows
//! without usable polygon geometry are dropped here, once, up front.

pub mod application;
pub mod domain;

pub use application::catalog::RegionCatalog;
pub use domain::columns::CatalogColumns;
pub use domain::region::{ROUND_COUNT, Region};
