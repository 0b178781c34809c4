//! The interactive review loop's state machine.
//!
//! A session walks one ingredient category: pick the most frequent unmapped
//! raw name as the target, queue up lexically similar candidates, and ask
//! the operator about each one. Decisions mutate the in-memory map; the
//! shell persists it whenever a transition reports `save_map`.
//!
//! States: idle (no target) → comparing (target + current candidate) →
//! back to idle on `stop` or when nothing is left to map. Selecting a target
//! inserts its trivial self-mapping.

mod command;
mod state;

pub use command::Command;
pub use state::{Reply, ReviewSession};
