use super::display::{welcome_text, BoardStyle};
use super::{Cli, CliError};
use crate::chess::Color;
use crate::engine::options::DEFAULT_SEARCH_DEPTH;
use crate::engine::{EngineOptions, UciEngine};
use crate::session::{stdin_lines, SessionError, SessionLoop, SessionSettings, TurnCoordinator};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "UCIMATE_CONFIG_DIR";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UCI engine executable
    pub engine_path: PathBuf,
    /// Whether the engine plays one side
    pub automated_opponent: bool,
    /// Side played by the engine
    pub automated_color: Color,
    /// Plies searched for each engine move
    pub search_depth: u8,
    pub hash_size_mb: u32,
    pub ponder: bool,
    pub own_book: bool,
    pub multi_pv: u32,
    /// Seconds to wait for any single engine response
    pub engine_timeout_secs: u64,
    /// Unicode glyphs instead of letters
    pub unicode: bool,
}

impl Default for Config {
    fn default() -> Self {
        let engine = EngineOptions::default();
        Self {
            engine_path: PathBuf::from("./stockfish"),
            automated_opponent: true,
            automated_color: Color::Black,
            search_depth: DEFAULT_SEARCH_DEPTH,
            hash_size_mb: engine.hash_size_mb,
            ponder: engine.ponder,
            own_book: engine.own_book,
            multi_pv: engine.multi_pv,
            engine_timeout_secs: engine.response_timeout.as_secs(),
            unicode: true,
        }
    }
}

impl Config {
    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        ProjectDirs::from("dev", "ucimate", "ucimate")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn default_config_file() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration file")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load `explicit` if given (it must exist), else the default file if it
    /// exists, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_file = Self::default_config_file()?;
        if default_file.exists() {
            debug!("Loading configuration from {}", default_file.display());
            Self::from_file(&default_file)
        } else {
            Ok(Self::default())
        }
    }

    /// Layer command-line flags over the loaded settings
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.engine_path {
            self.engine_path = path.clone();
        }
        if cli.no_automated_opponent {
            self.automated_opponent = false;
        }
        if cli.automated_plays_white {
            self.automated_color = Color::White;
        }
        if let Some(depth) = cli.depth {
            self.search_depth = depth;
        }
        if cli.ascii {
            self.unicode = false;
        }
    }

    pub fn validate(&self) -> Result<(), CliError> {
        if self.engine_path.as_os_str().is_empty() {
            return Err(CliError::Configuration {
                setting: "engine_path".to_string(),
                issue: "path is empty".to_string(),
                suggestion: "Point --engine-path at a UCI engine such as stockfish".to_string(),
            });
        }
        if !(1..=64).contains(&self.search_depth) {
            return Err(CliError::Configuration {
                setting: "search_depth".to_string(),
                issue: format!("{} is outside 1-64", self.search_depth),
                suggestion: "Use a depth such as 10".to_string(),
            });
        }
        if self.hash_size_mb == 0 {
            return Err(CliError::Configuration {
                setting: "hash_size_mb".to_string(),
                issue: "must be at least 1".to_string(),
                suggestion: "Use the default of 128".to_string(),
            });
        }
        if self.multi_pv == 0 {
            return Err(CliError::Configuration {
                setting: "multi_pv".to_string(),
                issue: "must be at least 1".to_string(),
                suggestion: "Use the default of 4".to_string(),
            });
        }
        if self.engine_timeout_secs == 0 {
            return Err(CliError::Configuration {
                setting: "engine_timeout_secs".to_string(),
                issue: "must be at least 1".to_string(),
                suggestion: "Use the default of 30".to_string(),
            });
        }
        Ok(())
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            hash_size_mb: self.hash_size_mb,
            ponder: self.ponder,
            own_book: self.own_book,
            multi_pv: self.multi_pv,
            response_timeout: Duration::from_secs(self.engine_timeout_secs),
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            automated_color: self.automated_opponent.then_some(self.automated_color),
            search_depth: self.search_depth,
            engine_path: self.engine_path.clone(),
        }
    }

    pub fn board_style(&self) -> BoardStyle {
        if self.unicode {
            BoardStyle::Unicode
        } else {
            BoardStyle::Ascii
        }
    }
}

/// Main application state
pub struct App {
    pub config: Config,
}

impl App {
    /// Resolve configuration from file and flags
    pub fn new(cli: &Cli) -> Result<Self, CliError> {
        let mut config = Config::load(cli.config.as_deref())?;
        config.apply_cli(cli);
        config.validate()?;
        Ok(Self { config })
    }

    /// Launch the engine and play on stdin/stdout until exit, end of input,
    /// Ctrl-C or a fatal error. Stdin is read on its own thread, which is
    /// left behind on Ctrl-C instead of holding the process open.
    pub async fn run(self) -> Result<(), CliError> {
        let engine = UciEngine::start(&self.config.engine_path, &self.config.engine_options())
            .await
            .map_err(CliError::EngineLaunch)?;

        let coordinator = TurnCoordinator::new(self.config.session_settings(), engine);
        let mut session = SessionLoop::new(
            coordinator,
            self.config.board_style(),
            std::io::stdout(),
        );

        print!("{}", welcome_text());
        info!("Session ready");

        let shutdown = async {
            // If the handler cannot be installed, only the other exit paths remain
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };
        let input = stdin_lines().map_err(SessionError::from)?;
        session.run(input, shutdown).await?;

        Ok(())
    }
}

/// Entry point used by the binary
pub async fn run(cli: Cli) -> Result<(), CliError> {
    App::new(&cli)?.run().await
}
