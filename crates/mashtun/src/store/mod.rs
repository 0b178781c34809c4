//! Persisted ingredient maps.
//!
//! One map per category, raw name → canonical name. The map is the durable
//! output of a reconciliation session: it is loaded at session start, updated
//! on every accepted decision, and written back with rotating numbered
//! backups so a bad session cannot destroy prior work.

mod map;
mod persistence;

pub use map::IngredientMap;
pub use persistence::{MapStore, DEFAULT_RETENTION, MAP_FORMAT_VERSION};
