use std::fmt;

/// Reserved session commands. Matching is exact and case-sensitive, and a
/// command always wins over move parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Stop,
    Exit,
    ShowFen,
    Help,
}

impl SessionCommand {
    pub const ALL: [SessionCommand; 5] = [
        SessionCommand::Start,
        SessionCommand::Stop,
        SessionCommand::Exit,
        SessionCommand::ShowFen,
        SessionCommand::Help,
    ];

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.token() == input)
    }

    pub fn token(&self) -> &'static str {
        match self {
            SessionCommand::Start => "start",
            SessionCommand::Stop => "stop",
            SessionCommand::Exit => "exit",
            SessionCommand::ShowFen => "showfen",
            SessionCommand::Help => "help",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SessionCommand::Start => "start a new game from the initial position",
            SessionCommand::Stop => "stop the current game",
            SessionCommand::Exit => "shut down the engine and quit",
            SessionCommand::ShowFen => "print the current position as FEN",
            SessionCommand::Help => "show this help",
        }
    }
}

impl fmt::Display for SessionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
