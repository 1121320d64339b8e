use super::{Session, SessionCommand, SessionError, SessionSettings};
use crate::chess::{rules, Color, MIN_MOVE_LEN};
use crate::engine::EngineAdapter;
use tracing::{debug, info, warn};

/// Error-slot text for any rejected human move
pub const ILLEGAL_MOVE_MESSAGE: &str = "Illegal move";

/// Result of an administrative command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Started,
    Stopped,
    /// FEN of the current position, if a game was ever started
    Fen(Option<String>),
    Help,
    Exit,
    /// The game ended while resolving the engine's opening move
    GameOver(Color),
}

/// Result of one non-command input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// No game running, or input too short to be a move
    Ignored,
    /// The move was rejected; nothing changed
    Illegal,
    /// The human move was applied, followed by any automated replies
    Played,
    /// The engine found no legal move for the given side; the session stopped
    GameOver(Color),
}

/// Decides, for every input line, what happens to the game.
///
/// Owns the [`Session`] and the engine handle. Legality of a human move is
/// gated by the engine; the board's own stricter move application may still
/// refuse it, in which case the move is reported as illegal just the same.
pub struct TurnCoordinator<E> {
    session: Session,
    engine: E,
    engine_released: bool,
}

impl<E: EngineAdapter> TurnCoordinator<E> {
    pub fn new(settings: SessionSettings, engine: E) -> Self {
        Self {
            session: Session::new(settings),
            engine,
            engine_released: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Side to move, shown in the prompt while a game is running
    pub fn turn_indicator(&self) -> Option<Color> {
        self.session
            .is_running()
            .then(|| self.session.active_player())
    }

    pub fn current_fen(&self) -> Option<String> {
        self.session.board().map(rules::position_to_fen)
    }

    pub async fn handle_command(
        &mut self,
        command: SessionCommand,
    ) -> Result<CommandOutcome, SessionError> {
        debug!("Handling command '{}'", command);

        match command {
            SessionCommand::Start => {
                self.session.begin(rules::new_position());
                info!("Game started");
                match self.resolve_automated_turns().await? {
                    Some(loser) => Ok(CommandOutcome::GameOver(loser)),
                    None => Ok(CommandOutcome::Started),
                }
            }
            SessionCommand::Stop => {
                self.session.halt();
                info!("Game stopped");
                Ok(CommandOutcome::Stopped)
            }
            SessionCommand::ShowFen => Ok(CommandOutcome::Fen(self.current_fen())),
            SessionCommand::Help => Ok(CommandOutcome::Help),
            SessionCommand::Exit => {
                self.session.halt();
                Ok(CommandOutcome::Exit)
            }
        }
    }

    pub async fn handle_turn(&mut self, input: &str) -> Result<TurnOutcome, SessionError> {
        if !self.session.is_running() {
            debug!("No game running, ignoring '{}'", input);
            return Ok(TurnOutcome::Ignored);
        }

        // The engine may still owe a move before the human can play
        if let Some(loser) = self.resolve_automated_turns().await? {
            return Ok(TurnOutcome::GameOver(loser));
        }

        if input.len() < MIN_MOVE_LEN {
            debug!("Input '{}' too short for a move, ignoring", input);
            return Ok(TurnOutcome::Ignored);
        }

        if !self.accept_move(input).await? {
            return Ok(TurnOutcome::Illegal);
        }

        match self.resolve_automated_turns().await? {
            Some(loser) => Ok(TurnOutcome::GameOver(loser)),
            None => Ok(TurnOutcome::Played),
        }
    }

    /// Release the engine. Only the first call reaches the engine.
    pub async fn release_engine(&mut self) -> Result<(), SessionError> {
        if self.engine_released {
            return Ok(());
        }
        self.engine_released = true;
        self.session.halt();
        self.engine.close().await?;
        info!("Engine released");
        Ok(())
    }

    /// Play a human move if the engine calls it legal and the board agrees.
    /// Returns whether the move was applied.
    async fn accept_move(&mut self, input: &str) -> Result<bool, SessionError> {
        let Some(board) = self.session.board_mut() else {
            return Ok(false);
        };

        self.engine
            .synchronize(&rules::position_to_fen(board))
            .await?;
        if !self.engine.is_legal(input).await? {
            debug!("Engine rejected '{}'", input);
            return Ok(false);
        }

        let mv = match rules::apply_coordinate_move(board, input) {
            Ok(mv) => mv,
            Err(e) => {
                warn!("Engine accepted '{}' but the board refused it: {}", input, e);
                return Ok(false);
            }
        };

        let side = rules::side_to_move(&rules::position_to_fen(board))?;
        self.session.set_active_player(side);
        info!("Played {}, {} to move", mv, side);
        Ok(true)
    }

    /// Keep asking the engine for moves while it is the engine's turn.
    /// Returns the side left without a legal move if the game ended.
    async fn resolve_automated_turns(&mut self) -> Result<Option<Color>, SessionError> {
        while self.session.is_automated_turn() {
            let mover = self.session.active_player();
            let depth = self.session.settings().search_depth;
            let Some(board) = self.session.board_mut() else {
                break;
            };

            self.engine
                .synchronize(&rules::position_to_fen(board))
                .await?;
            let Some(mv) = self.engine.best_move(depth).await? else {
                info!("{} has no legal moves, game over", mover);
                self.session.halt();
                return Ok(Some(mover));
            };

            rules::apply_coordinate_move(board, &mv).map_err(|reason| {
                SessionError::EngineMoveRejected {
                    mv: mv.clone(),
                    reason,
                }
            })?;

            let side = rules::side_to_move(&rules::position_to_fen(board))?;
            self.session.set_active_player(side);
            info!("Engine ({}) played {}", mover, mv);
        }

        Ok(None)
    }
}
