//! Dicemap — round filtering and game session state.
//!
//! A session rolls up to three dice. Each committed outcome narrows the
//! region catalog to the regions whose round key matches it, and moves the
//! map focus to the first survivor's center.

pub mod application;
pub mod config;
pub mod domain;

pub use config::GameConfig;
