use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ucimate", version)]
#[command(about = "Play chess against a UCI engine (or a friend) in the terminal")]
pub struct Cli {
    /// Path to the UCI engine executable [default: ./stockfish]
    #[arg(long = "engine-path", value_name = "PATH")]
    pub engine_path: Option<PathBuf>,

    /// Don't play against the engine; two people share the keyboard
    #[arg(long)]
    pub no_automated_opponent: bool,

    /// Let the engine play White (it plays Black otherwise)
    #[arg(long)]
    pub automated_plays_white: bool,

    /// Search depth for engine moves [default: 10]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=64))]
    pub depth: Option<u8>,

    /// Draw pieces as letters instead of Unicode glyphs
    #[arg(long)]
    pub ascii: bool,

    /// Read settings from this TOML file instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
