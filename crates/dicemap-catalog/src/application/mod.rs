//! Catalog construction.

pub mod catalog;
