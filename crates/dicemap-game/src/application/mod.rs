//! Application services for the game context.

pub mod command_handlers;
pub mod query_handlers;
