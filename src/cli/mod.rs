pub mod args;
pub mod commands;
mod context;

pub use args::{Cli, Commands};
pub use context::Context;
