use crate::chess::Color;

const SEPARATOR: &str = " \u{25AB} ";

/// Transient info and error messages, each shown in one prompt and then cleared
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MessageSlots {
    info: Option<String>,
    error: Option<String>,
}

impl MessageSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.info = Some(message.into());
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Render the prompt and empty both slots
    pub fn take_prompt(&mut self, turn: Option<Color>) -> String {
        let prompt = compose_prompt(self.info.as_deref(), self.error.as_deref(), turn);
        self.info = None;
        self.error = None;
        prompt
    }
}

/// `<info> ▫ <error> ▫ turn: <color># `, leaving out whatever is absent
pub fn compose_prompt(info: Option<&str>, error: Option<&str>, turn: Option<Color>) -> String {
    let turn = turn.map(|color| format!("turn: {}", color));
    let parts: Vec<&str> = [info, error, turn.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

    format!("{}# ", parts.join(SEPARATOR))
}
