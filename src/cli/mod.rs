pub(crate) mod args;
pub(crate) mod commands;

pub(crate) use args::{Cli, PrintMode};
pub(crate) use commands::Commands;
