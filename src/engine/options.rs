use std::time::Duration;

/// Search depth used for the automated opponent unless configured otherwise
pub const DEFAULT_SEARCH_DEPTH: u8 = 10;

/// Tuning sent to the engine at launch, plus client-side limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Transposition table size in MB (UCI `Hash`)
    pub hash_size_mb: u32,
    pub ponder: bool,
    pub own_book: bool,
    /// Number of principal variations (UCI `MultiPV`)
    pub multi_pv: u32,
    /// Upper bound on any single wait for an engine response
    pub response_timeout: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            hash_size_mb: 128,
            ponder: false,
            own_book: true,
            multi_pv: 4,
            response_timeout: Duration::from_secs(30),
        }
    }
}

impl EngineOptions {
    /// `setoption` commands in the order they are sent
    pub fn setoption_commands(&self) -> Vec<String> {
        vec![
            format!("setoption name Hash value {}", self.hash_size_mb),
            format!("setoption name Ponder value {}", self.ponder),
            format!("setoption name OwnBook value {}", self.own_book),
            format!("setoption name MultiPV value {}", self.multi_pv),
        ]
    }
}
