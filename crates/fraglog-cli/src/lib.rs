//! Fraglog CLI library.
//!
//! The collaborator shell around `fraglog-core`: file reading, rendering to
//! stdout, and the delimited export. The core itself never touches I/O.

mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
