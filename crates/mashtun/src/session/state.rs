//! The review session: an explicit state struct plus a pure transition
//! function.
//!
//! All loop state lives here: current target, candidate queue, decision
//! history. Every command goes through [`ReviewSession::handle`], which
//! mutates the session and returns a [`Reply`] describing what to tell the
//! operator and whether the map needs persisting. The session never touches
//! the terminal or the filesystem; the I/O shell in the CLI crate owns both.

use std::collections::VecDeque;

use crate::category::Category;
use crate::dataset::NameCounts;
use crate::similarity::SimilarityRanker;
use crate::store::IngredientMap;

use super::command::Command;

/// What a transition asks the shell to do.
#[derive(Debug, Default)]
pub struct Reply {
    /// Lines to show the operator, in order.
    pub messages: Vec<String>,
    /// The map changed; persist it before the next prompt.
    pub save_map: bool,
}

impl Reply {
    fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}

/// A recorded acceptance, for undo.
#[derive(Debug, Clone)]
struct Acceptance {
    raw: String,
    canonical: String,
}

/// State of one reconciliation session over a single category.
pub struct ReviewSession {
    category: Category,
    map: IngredientMap,
    /// Normalized raw names from the dataset column, duplicates included.
    names: Vec<String>,
    ranker: Box<dyn SimilarityRanker>,
    target: Option<String>,
    queue: VecDeque<String>,
    current: Option<String>,
    history: Vec<Acceptance>,
}

impl ReviewSession {
    /// Start a session from a loaded map and the category's raw-name column.
    pub fn new(
        category: Category,
        map: IngredientMap,
        names: Vec<String>,
        ranker: Box<dyn SimilarityRanker>,
    ) -> Self {
        Self {
            category,
            map,
            names,
            ranker,
            target: None,
            queue: VecDeque::new(),
            current: None,
            history: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The map in its current state; the shell persists this.
    pub fn map(&self) -> &IngredientMap {
        &self.map
    }

    /// Whether a target is being mapped.
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Unique raw names not yet in the map.
    pub fn remaining_unmapped(&self) -> usize {
        self.tally().len()
    }

    /// Execute a command against the session.
    pub fn handle(&mut self, command: Command) -> Reply {
        let mut reply = Reply::default();
        match command {
            Command::Map => self.begin_mapping(&mut reply),
            Command::Accept => self.accept(&mut reply),
            Command::Reject => self.reject(&mut reply),
            Command::Exclude(substr) => self.exclude(&substr, &mut reply),
            Command::Rename(name) => self.rename(&name, &mut reply),
            Command::Undo => self.undo(&mut reply),
            Command::Status => self.status(&mut reply),
            Command::Save => {
                reply.save_map = true;
                reply.say(format!("Saving {} map.", self.category));
            }
            Command::Stop => self.stop(&mut reply),
        }
        reply
    }

    fn tally(&self) -> NameCounts {
        NameCounts::tally(self.names.iter().map(|s| s.as_str()), &self.map)
    }

    fn begin_mapping(&mut self, reply: &mut Reply) {
        if let Some(current) = &self.current {
            // Already comparing; re-present rather than reselect
            reply.say(self.comparison_prompt(current));
            return;
        }
        self.next_target(reply);
    }

    /// Select the next target and its candidate queue.
    ///
    /// Each new target gets a trivial self-mapping, so a target with no
    /// similar names still leaves the pool and the loop makes progress.
    fn next_target(&mut self, reply: &mut Reply) {
        let counts = self.tally();
        let Some(target) = counts.most_common().map(|s| s.to_string()) else {
            self.target = None;
            self.current = None;
            reply.say(format!("No {}'s left to map.", self.category));
            return;
        };

        self.map.insert(target.clone(), target.clone());
        reply.save_map = true;
        self.target = Some(target.clone());

        let pool: Vec<String> = counts
            .names()
            .filter(|name| *name != target)
            .map(|s| s.to_string())
            .collect();
        self.queue = self
            .ranker
            .rank(&target, &pool)
            .into_iter()
            .map(|m| m.name)
            .collect();

        if let Some(first) = self.queue.pop_front() {
            reply.say(format!(
                "Mapping {}'s similar to '{}' ({} candidate(s)).",
                self.category,
                target,
                self.queue.len() + 1
            ));
            reply.say(self.comparison_prompt(&first));
            self.current = Some(first);
        } else {
            self.current = None;
            reply.say(format!(
                "No names similar to '{}'. Use 'map' for the next target.",
                target
            ));
        }
    }

    fn comparison_prompt(&self, candidate: &str) -> String {
        let target = self.target.as_deref().unwrap_or("?");
        format!("Does '{candidate}' belong with '{target}'? (y/n)")
    }

    /// Advance to the next candidate, or the next target once the queue is
    /// empty.
    fn advance(&mut self, reply: &mut Reply) {
        if let Some(next) = self.queue.pop_front() {
            reply.say(format!("{} candidate(s) remaining.", self.queue.len() + 1));
            reply.say(self.comparison_prompt(&next));
            self.current = Some(next);
        } else {
            self.next_target(reply);
        }
    }

    fn accept(&mut self, reply: &mut Reply) {
        let Some(candidate) = self.current.take() else {
            reply.say("No candidate under review. Use 'map' to start.");
            return;
        };
        let target = self.target.clone().expect("comparing without a target");

        self.map.insert(candidate.clone(), target.clone());
        self.history.push(Acceptance {
            raw: candidate,
            canonical: target,
        });
        reply.save_map = true;
        reply.say("Accepted.");
        self.advance(reply);
    }

    fn reject(&mut self, reply: &mut Reply) {
        if self.current.take().is_none() {
            reply.say("No candidate under review. Use 'map' to start.");
            return;
        }
        reply.say("Rejected.");
        self.advance(reply);
    }

    fn exclude(&mut self, substr: &str, reply: &mut Reply) {
        if substr.is_empty() {
            reply.say("exclude needs a substring.");
            return;
        }

        let before = self.queue.len();
        self.queue.retain(|name| {
            let keep = !name.contains(substr);
            if !keep {
                reply.messages.push(format!("Excluded '{name}'."));
            }
            keep
        });
        reply.say(format!(
            "Dropped {} queued candidate(s) containing '{}'.",
            before - self.queue.len(),
            substr
        ));

        // A matching current candidate is an implicit rejection
        if self
            .current
            .as_deref()
            .is_some_and(|current| current.contains(substr))
        {
            let current = self.current.take().unwrap();
            reply.say(format!("Rejected '{current}' (matches '{substr}')."));
            self.advance(reply);
        }
    }

    fn rename(&mut self, new_name: &str, reply: &mut Reply) {
        let Some(target) = self.target.clone() else {
            reply.say("No target selected. Use 'map' to start.");
            return;
        };
        if new_name.is_empty() {
            reply.say("rename needs a new name.");
            return;
        }

        let changed = self.map.rename(&target, new_name);
        for record in &mut self.history {
            if record.canonical == target {
                record.canonical = new_name.to_string();
            }
        }
        self.target = Some(new_name.to_string());
        reply.save_map = true;
        reply.say(format!(
            "Re-pointed {changed} entries from '{target}' to '{new_name}'."
        ));
    }

    fn undo(&mut self, reply: &mut Reply) {
        let Some(record) = self.history.pop() else {
            reply.say("Nothing to undo.");
            return;
        };

        self.map.remove(&record.raw);
        if let Some(current) = self.current.take() {
            self.queue.push_front(current);
        }
        self.target = Some(record.canonical.clone());
        reply.say(format!("Undid acceptance of '{}'.", record.raw));
        reply.say(self.comparison_prompt(&record.raw));
        self.current = Some(record.raw);
        reply.save_map = true;
    }

    fn status(&mut self, reply: &mut Reply) {
        reply.say(format!("Category: {}", self.category));
        reply.say(format!("Mapped names: {}", self.map.len()));
        reply.say(format!("Unmapped unique names: {}", self.remaining_unmapped()));
        match (&self.target, &self.current) {
            (Some(target), Some(current)) => {
                reply.say(format!(
                    "Comparing '{current}' against '{target}' ({} queued).",
                    self.queue.len()
                ));
            }
            (Some(target), None) => reply.say(format!("Target '{target}', no candidate.")),
            _ => reply.say("No active target. Use 'map' to start."),
        }
    }

    fn stop(&mut self, reply: &mut Reply) {
        self.target = None;
        self.queue.clear();
        self.current = None;
        self.history.clear();
        reply.say("Stopped mapping. Map stays loaded; 'map' resumes.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::RatioRanker;

    fn hop_session(names: &[&str]) -> ReviewSession {
        ReviewSession::new(
            Category::Hop,
            IngredientMap::new(),
            names.iter().map(|s| s.to_string()).collect(),
            Box::new(RatioRanker::new()),
        )
    }

    fn active_session() -> ReviewSession {
        // "cascade" twice so it is the most frequent name
        let mut session = hop_session(&["cascade", "cascade", "casscade", "cascades", "citra"]);
        session.handle(Command::Map);
        session
    }

    #[test]
    fn test_map_selects_most_frequent_target() {
        let session = active_session();
        assert_eq!(session.target(), Some("cascade"));
        assert!(session.current().is_some());
        // Trivial self-mapping inserted on selection
        assert_eq!(session.map().apply("cascade"), Some("cascade"));
    }

    #[test]
    fn test_accept_adds_one_entry_and_shrinks_queue() {
        let mut session = active_session();
        let map_len = session.map().len();
        let queue_len = session.queue_len();
        let candidate = session.current().unwrap().to_string();

        let reply = session.handle(Command::Accept);

        assert!(reply.save_map);
        assert_eq!(session.map().len(), map_len + 1);
        assert_eq!(session.map().apply(&candidate), Some("cascade"));
        // One popped from the queue to become the new current
        assert_eq!(session.queue_len(), queue_len.saturating_sub(1));
    }

    #[test]
    fn test_reject_adds_nothing() {
        let mut session = active_session();
        let map_len = session.map().len();
        let candidate = session.current().unwrap().to_string();

        session.handle(Command::Reject);

        assert_eq!(session.map().len(), map_len);
        assert_eq!(session.map().apply(&candidate), None);
    }

    #[test]
    fn test_undo_restores_map_and_candidate() {
        let mut session = active_session();
        let candidate = session.current().unwrap().to_string();
        let before = session.map().len();

        session.handle(Command::Accept);
        let reply = session.handle(Command::Undo);

        assert!(reply.save_map);
        assert_eq!(session.map().len(), before);
        assert_eq!(session.current(), Some(candidate.as_str()));
    }

    #[test]
    fn test_undo_with_empty_history_is_noop() {
        let mut session = active_session();
        let reply = session.handle(Command::Undo);
        assert!(!reply.save_map);
        assert!(reply.messages[0].contains("Nothing to undo"));
    }

    #[test]
    fn test_exclude_drops_queued_candidates() {
        // active_session: current "casscade", queue ["cascades"]
        let mut session = active_session();

        let reply = session.handle(Command::Exclude("cascades".to_string()));

        assert_eq!(session.queue_len(), 0);
        assert_eq!(session.current(), Some("casscade"));
        assert!(reply
            .messages
            .iter()
            .any(|m| m.contains("Excluded 'cascades'")));
    }

    #[test]
    fn test_exclude_implicitly_rejects_matching_current() {
        let mut session = active_session();

        let reply = session.handle(Command::Exclude("cass".to_string()));

        // Only the current candidate "casscade" matches; it is rejected, not
        // mapped, and the loop advances to the queued "cascades"
        assert!(reply
            .messages
            .iter()
            .any(|m| m.contains("Rejected 'casscade'")));
        assert_eq!(session.map().apply("casscade"), None);
        assert_eq!(session.target(), Some("cascade"));
        assert_eq!(session.current(), Some("cascades"));
    }

    #[test]
    fn test_exclude_without_argument_is_noop() {
        let mut session = active_session();
        let queue = session.queue_len();
        let reply = session.handle(Command::Exclude(String::new()));
        assert_eq!(session.queue_len(), queue);
        assert!(reply.messages[0].contains("substring"));
    }

    #[test]
    fn test_rename_repoints_entries_and_target() {
        let mut session = active_session();
        session.handle(Command::Accept); // casscade (or cascades) -> cascade

        session.handle(Command::Rename("cascade (US)".to_string()));

        assert_eq!(session.target(), Some("cascade (US)"));
        assert_eq!(session.map().apply("cascade"), Some("cascade (US)"));
    }

    #[test]
    fn test_rename_empty_is_noop() {
        let mut session = active_session();
        let reply = session.handle(Command::Rename(String::new()));
        assert!(!reply.save_map);
        assert_eq!(session.target(), Some("cascade"));
        assert!(reply.messages[0].contains("new name"));
    }

    #[test]
    fn test_accept_without_candidate_is_noop() {
        let mut session = hop_session(&["cascade"]);
        let reply = session.handle(Command::Accept);
        assert!(!reply.save_map);
        assert!(session.map().is_empty());
        assert!(reply.messages[0].contains("No candidate"));
    }

    #[test]
    fn test_exhaustion_reports_nothing_left() {
        let mut session = hop_session(&["cascade", "casscade"]);
        session.handle(Command::Map);
        session.handle(Command::Accept); // casscade -> cascade

        // Everything mapped now; a further 'map' finds nothing
        let reply = session.handle(Command::Map);
        assert!(reply
            .messages
            .iter()
            .any(|m| m.contains("left to map")));
        assert!(!session.is_active());
    }

    #[test]
    fn test_stop_clears_active_state() {
        let mut session = active_session();
        session.handle(Command::Stop);

        assert!(!session.is_active());
        assert_eq!(session.current(), None);
        assert_eq!(session.queue_len(), 0);
    }

    #[test]
    fn test_map_while_comparing_represents_prompt() {
        let mut session = active_session();
        let candidate = session.current().unwrap().to_string();
        let reply = session.handle(Command::Map);

        assert_eq!(session.current(), Some(candidate.as_str()));
        assert!(reply.messages[0].contains(&candidate));
    }
}
