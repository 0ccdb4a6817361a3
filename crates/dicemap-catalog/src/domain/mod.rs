//! Domain types for the region catalog.

pub mod columns;
pub mod region;
