//! Line-oriented command input for the headless runner.
//!
//! Each line is a JSON `PlayerCommand`, for example
//! `{"type":"Rotate","degrees":90.0}`, or one of the runner keywords
//! `status` and `quit`.

use skirmish_core::commands::PlayerCommand;

/// What the operator asked for.
#[derive(Debug, PartialEq)]
pub enum ConsoleInput {
    Command(PlayerCommand),
    /// Print a summary of the latest snapshot.
    Status,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleInput>, String> {
    let line = line.trim();
    match line {
        "" => Ok(None),
        _ if line.starts_with('#') => Ok(None),
        "status" => Ok(Some(ConsoleInput::Status)),
        "quit" | "exit" => Ok(Some(ConsoleInput::Quit)),
        _ => serde_json::from_str(line)
            .map(|c| Some(ConsoleInput::Command(c)))
            .map_err(|e| format!("bad command {line:?}: {e}")),
    }
}
