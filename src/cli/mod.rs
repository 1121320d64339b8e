pub mod app;
pub mod commands;
pub mod display;
pub mod error_handler;

pub use app::{run, App, Config};
pub use commands::Cli;
pub use display::{help_text, render_board, welcome_text, BoardStyle};
pub use error_handler::CliError;
