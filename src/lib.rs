//! Lazy directory tree with cursor navigation, rendered as box-drawn lines.

pub mod command;
pub mod error;
pub mod logging;
pub mod navigator;
pub mod render;
pub mod state;
pub mod terminal;
pub mod tree;
pub mod ui;

#[cfg(test)]
mod fixture;

pub use command::Command;
pub use error::{Error, Result};
pub use state::NavState;
pub use tree::{Entry, FileTree};
