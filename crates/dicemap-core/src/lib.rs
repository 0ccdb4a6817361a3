//! Dicemap Core — shared domain abstractions.
//!
//! This crate defines the traits and types the geometry, catalog and game
//! crates depend on. It contains no runtime or rendering code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
