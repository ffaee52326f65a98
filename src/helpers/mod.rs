//! Helper functions shared by commands

mod date;

pub use date::*;
