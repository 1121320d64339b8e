use super::{EngineAdapter, EngineError, EngineOptions};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info, warn};

/// How long `close` waits for the process to exit after `quit` before killing it
const QUIT_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Whether `s` has the shape of a UCI coordinate move (`e2e4`, `e7e8q`)
pub fn is_coordinate_move(s: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[a-h][1-8][a-h][1-8][qrbn]?$").expect("valid move pattern"))
        .is_match(s)
}

/// A UCI engine running as a child process, driven over its stdin/stdout.
///
/// The process is killed if the handle is dropped without [`close`](EngineAdapter::close).
pub struct UciEngine {
    path: PathBuf,
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    timeout: Duration,
    closed: bool,
}

impl UciEngine {
    /// Launch the engine at `path`, complete the UCI handshake and apply `options`
    pub async fn start(path: &Path, options: &EngineOptions) -> Result<Self, EngineError> {
        info!("Launching UCI engine: {}", path.display());

        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Launch {
                path: path.to_path_buf(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            return Err(EngineError::Launch {
                path: path.to_path_buf(),
                source: std::io::Error::other("engine stdio was not captured"),
            });
        };

        let mut engine = Self {
            path: path.to_path_buf(),
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            timeout: options.response_timeout,
            closed: false,
        };

        engine.send("uci").await?;
        engine.wait_for("uciok").await?;
        for command in options.setoption_commands() {
            engine.send(&command).await?;
        }
        engine.ready().await?;

        info!(
            "Engine ready (hash {} MB, multipv {}, ponder {}, own book {})",
            options.hash_size_mb, options.multi_pv, options.ponder, options.own_book
        );
        Ok(engine)
    }

    async fn send(&mut self, command: &str) -> Result<(), EngineError> {
        if self.closed {
            return Err(EngineError::Closed);
        }
        debug!(">> {}", command);
        self.stdin.write_all(command.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Next output line, bounded by the response timeout
    async fn read_line(&mut self, waiting_for: &str) -> Result<String, EngineError> {
        match tokio::time::timeout(self.timeout, self.stdout.next_line()).await {
            Ok(Ok(Some(line))) => {
                debug!("<< {}", line);
                Ok(line)
            }
            Ok(Ok(None)) => Err(EngineError::ProcessExited),
            Ok(Err(e)) => Err(EngineError::Io(e)),
            Err(_) => Err(EngineError::Timeout {
                waiting_for: waiting_for.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }

    /// Skip output until a line equal to `token` arrives
    async fn wait_for(&mut self, token: &str) -> Result<(), EngineError> {
        loop {
            if self.read_line(token).await?.trim() == token {
                return Ok(());
            }
        }
    }

    async fn ready(&mut self) -> Result<(), EngineError> {
        self.send("isready").await?;
        self.wait_for("readyok").await
    }

    /// Run `go <args>` and return the move from the `bestmove` line
    async fn go(&mut self, args: &str) -> Result<Option<String>, EngineError> {
        self.send(&format!("go {}", args)).await?;
        loop {
            let line = self.read_line("bestmove").await?;
            let mut tokens = line.split_whitespace();
            if tokens.next() != Some("bestmove") {
                continue;
            }
            return match tokens.next() {
                None => Err(EngineError::MalformedResponse(line.clone())),
                Some("(none)") | Some("0000") => Ok(None),
                Some(mv) if is_coordinate_move(mv) => Ok(Some(mv.to_string())),
                Some(_) => Err(EngineError::MalformedResponse(line.clone())),
            };
        }
    }
}

impl EngineAdapter for UciEngine {
    async fn synchronize(&mut self, fen: &str) -> Result<(), EngineError> {
        self.send(&format!("position fen {}", fen)).await?;
        self.ready().await
    }

    async fn best_move(&mut self, depth: u8) -> Result<Option<String>, EngineError> {
        self.go(&format!("depth {}", depth)).await
    }

    async fn is_legal(&mut self, mv: &str) -> Result<bool, EngineError> {
        if !is_coordinate_move(mv) {
            return Ok(false);
        }
        // Restricting the root moves to an illegal move leaves nothing to search
        let reply = self.go(&format!("depth 1 searchmoves {}", mv)).await?;
        Ok(reply.as_deref() == Some(mv))
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        if self.closed {
            return Ok(());
        }
        if let Err(e) = self.send("quit").await {
            debug!("Could not send quit: {}", e);
        }
        self.closed = true;

        match tokio::time::timeout(QUIT_GRACE_PERIOD, self.child.wait()).await {
            Ok(Ok(status)) => info!("Engine {} exited with {}", self.path.display(), status),
            Ok(Err(e)) => return Err(EngineError::Io(e)),
            Err(_) => {
                warn!("Engine {} ignored quit, killing process", self.path.display());
                self.child.kill().await?;
            }
        }
        Ok(())
    }
}
