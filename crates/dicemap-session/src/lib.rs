//! Dicemap — single-owner host for a game session.
//!
//! One tokio task owns the [`GameSession`](dicemap_game::domain::aggregates::GameSession).
//! Callers talk to it through a cloneable [`SessionHandle`]: commands go in
//! over a channel, committed [`SessionView`] snapshots and domain events come
//! out. The minimum rolling time is a timer owned by the task, so dropping
//! the task drops any transition still pending.

mod actor;
mod handle;

pub use dicemap_game::application::query_handlers::SessionView;
pub use handle::{SessionHandle, spawn_session};
