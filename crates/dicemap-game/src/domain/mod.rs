//! Domain model for the game context.

pub mod aggregates;
pub mod commands;
pub mod die;
pub mod events;
pub mod filter;
