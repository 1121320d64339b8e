use super::{
    CommandOutcome, LineSource, MessageSlots, SessionCommand, SessionError, TurnCoordinator,
    TurnOutcome,
};
use super::coordinator::ILLEGAL_MOVE_MESSAGE;
use crate::chess::Color;
use crate::cli::display::{help_text, render_board, BoardStyle};
use crate::engine::EngineAdapter;
use std::future::Future;
use std::io::Write;
use tracing::{error, info, warn};

/// Read-eval-print loop over a [`TurnCoordinator`].
///
/// Reads one line at a time from any [`LineSource`] and writes prompts,
/// boards and command output to `out`.
pub struct SessionLoop<E, W> {
    coordinator: TurnCoordinator<E>,
    slots: MessageSlots,
    history: Vec<String>,
    style: BoardStyle,
    out: W,
}

impl<E: EngineAdapter, W: Write> SessionLoop<E, W> {
    pub fn new(coordinator: TurnCoordinator<E>, style: BoardStyle, out: W) -> Self {
        Self {
            coordinator,
            slots: MessageSlots::new(),
            history: Vec::new(),
            style,
            out,
        }
    }

    pub fn coordinator(&self) -> &TurnCoordinator<E> {
        &self.coordinator
    }

    pub fn slots(&self) -> &MessageSlots {
        &self.slots
    }

    /// Every non-empty line entered so far, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Run until `exit`, end of input, a fatal error or `shutdown` resolving.
    /// The engine is released on every one of those paths.
    pub async fn run<L, S>(&mut self, input: L, shutdown: S) -> Result<(), SessionError>
    where
        L: LineSource,
        S: Future<Output = ()>,
    {
        let outcome = tokio::select! {
            outcome = self.drive(input) => outcome,
            _ = shutdown => {
                info!("Shutdown requested");
                Ok(())
            }
        };

        if let Err(e) = &outcome {
            error!("Session ended with error: {}", e);
        }

        let released = self.coordinator.release_engine().await;
        outcome.and(released)
    }

    async fn drive<L: LineSource>(&mut self, mut lines: L) -> Result<(), SessionError> {
        loop {
            let prompt = self.slots.take_prompt(self.coordinator.turn_indicator());
            write!(self.out, "{}", prompt)?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(self.out)?;
                info!("End of input");
                return Ok(());
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.history.push(line.to_string());

            let mut redraw = false;
            match SessionCommand::parse(line) {
                Some(command) => match self.coordinator.handle_command(command).await? {
                    CommandOutcome::Started => self.slots.set_info("Game started"),
                    CommandOutcome::Stopped => self.slots.set_info("Game stopped"),
                    CommandOutcome::Fen(Some(fen)) => writeln!(self.out, "FEN: {}", fen)?,
                    CommandOutcome::Fen(None) => self.slots.set_info("No game in progress"),
                    CommandOutcome::Help => write!(self.out, "{}", help_text())?,
                    CommandOutcome::Exit => return Ok(()),
                    CommandOutcome::GameOver(loser) => {
                        self.announce_game_over(loser);
                        redraw = true;
                    }
                },
                None => match self.coordinator.handle_turn(line).await? {
                    TurnOutcome::Illegal => self.slots.set_error(ILLEGAL_MOVE_MESSAGE),
                    TurnOutcome::GameOver(loser) => {
                        self.announce_game_over(loser);
                        redraw = true;
                    }
                    TurnOutcome::Ignored | TurnOutcome::Played => {}
                },
            }

            if redraw || self.coordinator.is_running() {
                self.draw_board()?;
            }
        }
    }

    fn announce_game_over(&mut self, loser: Color) {
        self.slots
            .set_info(format!("Game over: {} has no legal moves", loser));
    }

    fn draw_board(&mut self) -> Result<(), SessionError> {
        match self.coordinator.current_fen() {
            Some(fen) => self.draw_position(&fen),
            None => Ok(()),
        }
    }

    /// A position that cannot be rendered costs this redraw only, never the
    /// session.
    fn draw_position(&mut self, fen: &str) -> Result<(), SessionError> {
        match render_board(fen, self.style) {
            Ok(board) => writeln!(self.out, "{}", board)?,
            Err(e) => {
                warn!("Cannot draw '{}': {}", fen, e);
                self.slots.set_error(format!("Cannot draw board: {}", e));
            }
        }
        Ok(())
    }
}
