use crate::chess::{Board, Color};
use crate::engine::options::DEFAULT_SEARCH_DEPTH;
use std::path::PathBuf;

/// Startup configuration of a session; fixed for the lifetime of the program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Color played by the engine, or `None` for a game between two humans
    pub automated_color: Option<Color>,
    pub search_depth: u8,
    pub engine_path: PathBuf,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            automated_color: Some(Color::Black),
            search_depth: DEFAULT_SEARCH_DEPTH,
            engine_path: PathBuf::from("./stockfish"),
        }
    }
}

/// Mutable game state of one program run
#[derive(Debug, Clone)]
pub struct Session {
    settings: SessionSettings,
    running: bool,
    active_player: Color,
    /// Replaced on every `start`; kept (but frozen) after `stop`
    board: Option<Board>,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            running: false,
            active_player: Color::White,
            board: None,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn active_player(&self) -> Color {
        self.active_player
    }

    pub fn automated_opponent_enabled(&self) -> bool {
        self.settings.automated_color.is_some()
    }

    pub fn automated_color(&self) -> Option<Color> {
        self.settings.automated_color
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Whether the next move belongs to the engine
    pub fn is_automated_turn(&self) -> bool {
        self.running && self.settings.automated_color == Some(self.active_player)
    }

    /// Fresh position, White to move, game running
    pub(crate) fn begin(&mut self, board: Board) {
        self.active_player = board.active_color();
        self.board = Some(board);
        self.running = true;
    }

    pub(crate) fn halt(&mut self) {
        self.running = false;
    }

    pub(crate) fn board_mut(&mut self) -> Option<&mut Board> {
        self.board.as_mut()
    }

    pub(crate) fn set_active_player(&mut self, color: Color) {
        self.active_player = color;
    }
}
