//! Review-loop commands.
//!
//! Commands are a closed set; an input line either parses into one of these
//! variants or is reported as unrecognized by the shell. There is no dynamic
//! dispatch from command names to handlers.

/// A command the review session can execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Begin (or re-present) mapping: select a target and start comparing.
    Map,
    /// Accept the current candidate as the target's spelling variant.
    Accept,
    /// Reject the current candidate.
    Reject,
    /// Drop queued candidates containing a substring.
    Exclude(String),
    /// Re-point every entry of the current target to a new canonical name.
    Rename(String),
    /// Revert the most recent acceptance.
    Undo,
    /// Report session progress.
    Status,
    /// Persist the map now.
    Save,
    /// Clear the active target and return to the neutral prompt.
    Stop,
}

impl Command {
    /// Parse an input line into a command.
    ///
    /// The command word is case-insensitive; the argument (for `exclude` and
    /// `rename`) is taken verbatim, so canonical names keep their spelling.
    /// Returns `None` for lines that are not session commands.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "map" => Some(Command::Map),
            "y" | "yes" | "accept" => Some(Command::Accept),
            "n" | "no" | "reject" => Some(Command::Reject),
            "exclude" => Some(Command::Exclude(arg.to_string())),
            "rename" => Some(Command::Rename(arg.to_string())),
            "undo" => Some(Command::Undo),
            "status" => Some(Command::Status),
            "save" => Some(Command::Save),
            "stop" => Some(Command::Stop),
            _ => None,
        }
    }
}
