//! CLI commands

pub mod list;
pub mod new;
pub mod project;
pub mod search;
pub mod show;
