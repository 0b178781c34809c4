//! The interactive reconciliation shell.
//!
//! This is the I/O half of the review loop: it reads lines (from the
//! terminal or a played-back transcript), parses them, forwards session
//! commands to the pure state machine, prints the replies, and persists the
//! map whenever a transition asks for it.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use mashtun::session::Command;
use mashtun::{Category, MapStore, RatioRanker, RecipeData, ReviewSession};

/// What the shell should do after a line.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Continue,
    Quit,
}

pub struct Shell {
    data: RecipeData,
    store: MapStore,
    session: Option<ReviewSession>,
    /// Played-back command lines, consumed before reading the terminal.
    pending: VecDeque<String>,
    recorder: Option<File>,
}

impl Shell {
    pub fn new(data: RecipeData, store: MapStore) -> Self {
        Self {
            data,
            store,
            session: None,
            pending: VecDeque::new(),
            recorder: None,
        }
    }

    /// Load a category's map and start a fresh session over it.
    pub fn set_category(&mut self, category: Category) -> Result<(), Box<dyn std::error::Error>> {
        let map = self.store.load(category)?;
        println!("Loaded {} map ({} entries).", category, map.len());

        let names: Vec<String> = self
            .data
            .ingredient_names(category)?
            .into_iter()
            .flatten()
            .collect();

        self.session = Some(ReviewSession::new(
            category,
            map,
            names,
            Box::new(RatioRanker::new()),
        ));
        Ok(())
    }

    /// Queue a transcript's lines ahead of terminal input.
    pub fn queue_playback(&mut self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let contents = fs::read_to_string(path)?;
        self.pending.extend(
            contents
                .lines()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
        );
        Ok(())
    }

    /// Run the interactive loop until exit or end of input.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        println!("Welcome to the ingredient cleaner! Type ? to list commands.");

        let mut editor = DefaultEditor::new()?;
        loop {
            let line = if let Some(queued) = self.pending.pop_front() {
                queued
            } else {
                match editor.readline(&self.prompt()) {
                    Ok(line) => {
                        let _ = editor.add_history_entry(line.as_str());
                        line
                    }
                    Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                        println!("Bye.");
                        return Ok(());
                    }
                    Err(e) => return Err(e.into()),
                }
            };

            if self.dispatch(&line) == Outcome::Quit {
                println!("Bye.");
                return Ok(());
            }
        }
    }

    fn prompt(&self) -> String {
        match &self.session {
            Some(session) => format!("cleaner ({})> ", session.category()),
            None => "cleaner> ".to_string(),
        }
    }

    /// Handle one input line.
    fn dispatch(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        if line.is_empty() {
            return Outcome::Continue;
        }

        // Transcripts replay everything except playback itself
        if let Some(recorder) = &mut self.recorder {
            if !line.to_lowercase().starts_with("playback") {
                if let Err(e) = writeln!(recorder, "{line}") {
                    eprintln!("{} could not record line: {}", "Warning:".yellow(), e);
                }
            }
        }

        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "set_category" => self.handle_set_category(arg),
            "record" => self.handle_record(arg),
            "playback" => self.handle_playback(arg),
            "help" | "?" => self.print_help(),
            "exit" | "x" | "q" => return Outcome::Quit,
            _ => self.handle_session_command(line),
        }

        Outcome::Continue
    }

    fn handle_set_category(&mut self, arg: &str) {
        let category: Category = match arg.parse() {
            Ok(c) => c,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };
        if let Err(e) = self.set_category(category) {
            eprintln!("{} {}", "Error:".red().bold(), e);
        }
    }

    fn handle_record(&mut self, arg: &str) {
        if arg.is_empty() {
            println!("record needs a file name.");
            return;
        }
        match File::create(arg) {
            Ok(file) => {
                self.recorder = Some(file);
                println!("Recording commands to {arg}.");
            }
            Err(e) => eprintln!("{} could not open '{}': {}", "Error:".red().bold(), arg, e),
        }
    }

    fn handle_playback(&mut self, arg: &str) {
        if arg.is_empty() {
            println!("playback needs a file name.");
            return;
        }
        match self.queue_playback(arg) {
            Ok(()) => println!("Playing back commands from {arg}."),
            Err(e) => eprintln!("{} could not read '{}': {}", "Error:".red().bold(), arg, e),
        }
    }

    fn handle_session_command(&mut self, line: &str) {
        let Some(command) = Command::parse(line) else {
            println!("Unrecognized command '{line}'. Type ? for help.");
            return;
        };

        let Some(session) = &mut self.session else {
            println!("Set a category first: set_category <ferm|hop|yeast|misc>");
            return;
        };

        let reply = session.handle(command);
        for message in &reply.messages {
            println!("{message}");
        }

        if reply.save_map {
            let category = session.category();
            if let Err(e) = self.store.save(category, session.map()) {
                // Surfaced, not swallowed: losing decisions is the one thing
                // this tool must not do silently
                eprintln!("{} failed to save {} map: {}", "Error:".red().bold(), category, e);
            }
        }
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  set_category <cat>  load the map for ferm, hop, yeast, or misc");
        println!("  map                 pick the next target and start comparing");
        println!("  y / n               accept / reject the current candidate");
        println!("  exclude <substr>    drop queued candidates containing <substr>");
        println!("  rename <name>       re-point the current target's entries");
        println!("  undo                revert the most recent acceptance");
        println!("  status              show session progress");
        println!("  save                persist the map now");
        println!("  stop                clear the active target");
        println!("  record <file>       write subsequent commands to <file>");
        println!("  playback <file>     replay commands from <file>");
        println!("  exit                leave the cleaner");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mashtun::IngredientMap;
    use std::fs;
    use tempfile::TempDir;

    fn shell_fixture() -> (TempDir, Shell) {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("core.csv"),
            "id,batch_size,boil_size,efficiency,boil_time\n0,19,23,0.7,60\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("ingredients.csv"),
            "id,hop_name\n0,cascade\n0,cascade\n0,casscade\n0,citra\n",
        )
        .unwrap();

        let data = RecipeData::load(dir.path()).unwrap();
        let store = MapStore::new(dir.path().join("maps"));
        let shell = Shell::new(data, store);
        (dir, shell)
    }

    #[test]
    fn test_dispatch_full_review_flow() {
        let (dir, mut shell) = shell_fixture();

        assert_eq!(shell.dispatch("set_category hop"), Outcome::Continue);
        shell.dispatch("map");
        shell.dispatch("y");

        // The acceptance was persisted as it happened
        let store = MapStore::new(dir.path().join("maps"));
        let map: IngredientMap = store.load(Category::Hop).unwrap();
        assert_eq!(map.apply("casscade"), Some("cascade"));
        assert_eq!(map.apply("cascade"), Some("cascade"));
    }

    #[test]
    fn test_dispatch_requires_category() {
        let (_dir, mut shell) = shell_fixture();
        // Not an error, just a report; no session exists yet
        assert_eq!(shell.dispatch("map"), Outcome::Continue);
        assert!(shell.session.is_none());
    }

    #[test]
    fn test_dispatch_exit_aliases() {
        let (_dir, mut shell) = shell_fixture();
        assert_eq!(shell.dispatch("exit"), Outcome::Quit);
        assert_eq!(shell.dispatch("x"), Outcome::Quit);
        assert_eq!(shell.dispatch("q"), Outcome::Quit);
    }

    #[test]
    fn test_playback_queues_commands() {
        let (dir, mut shell) = shell_fixture();
        let transcript = dir.path().join("session.cmd");
        fs::write(&transcript, "set_category hop\nmap\ny\n").unwrap();

        shell.queue_playback(&transcript).unwrap();
        while let Some(line) = shell.pending.pop_front() {
            shell.dispatch(&line);
        }

        let map = shell.store.load(Category::Hop).unwrap();
        assert!(map.apply("casscade").is_some());
    }

    #[test]
    fn test_record_writes_transcript() {
        let (dir, mut shell) = shell_fixture();
        let transcript = dir.path().join("session.cmd");

        shell.dispatch(&format!("record {}", transcript.display()));
        shell.dispatch("set_category hop");
        shell.dispatch("map");

        let recorded = fs::read_to_string(&transcript).unwrap();
        assert!(recorded.contains("set_category hop"));
        assert!(recorded.contains("map"));
        assert!(!recorded.contains("record"));
    }
}
