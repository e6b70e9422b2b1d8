//! Terminal presentation for the hoist binary.

pub mod ci;
pub mod context;
pub mod error;
pub mod primitives;
pub mod prompt;
pub mod terminal;
pub mod theme;
pub mod views;
