//! Command-line front end for `rtx-question` and `rtx-markov`.

pub mod cli;
pub mod commands;

pub use cli::{AskCli, Command};
pub use commands::{Resources, run};
