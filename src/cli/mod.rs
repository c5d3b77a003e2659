mod commands;

pub use commands::{Cli, Command, DarkModeAction, OutputFormat, PredictArgs};
