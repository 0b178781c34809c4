//! Mashtun: ingredient-name reconciliation for homebrewing recipe datasets.
//!
//! Recipe files spell the same ingredient a dozen ways. Mashtun loads the
//! raw ingredient columns of a tabular recipe store, walks an operator
//! through fuzzy-matched candidates one decision at a time, and persists the
//! resulting raw → canonical maps per category. The cleaned names feed the
//! derived brewing features (gravity, bitterness, color, alcohol) used
//! downstream.
//!
//! # Core pieces
//!
//! - **Store** ([`store`]): persisted per-category maps with rotating backups
//! - **Candidate generation** ([`similarity`]): a swappable ranker over a
//!   similarity cutoff
//! - **Review loop** ([`session`]): a pure state machine the CLI shell drives
//! - **Features** ([`features`]): stateless brewing-chemistry arithmetic
//!
//! # Example
//!
//! ```no_run
//! use mashtun::{Category, MapStore, RecipeData, ReviewSession, RatioRanker};
//! use mashtun::session::Command;
//!
//! let data = RecipeData::load("data/").unwrap();
//! let store = MapStore::new("maps/");
//! let map = store.load(Category::Hop).unwrap();
//! let names: Vec<String> = data
//!     .ingredient_names(Category::Hop)
//!     .unwrap()
//!     .into_iter()
//!     .flatten()
//!     .collect();
//!
//! let mut session = ReviewSession::new(
//!     Category::Hop,
//!     map,
//!     names,
//!     Box::new(RatioRanker::new()),
//! );
//! let reply = session.handle(Command::Map);
//! for line in &reply.messages {
//!     println!("{line}");
//! }
//! ```

pub mod apply;
pub mod category;
pub mod coverage;
pub mod dataset;
pub mod error;
pub mod features;
pub mod normalize;
pub mod session;
pub mod similarity;
pub mod store;

pub use apply::{apply_maps, ApplyCounts, ApplyOutcome};
pub use category::Category;
pub use coverage::CoverageReport;
pub use dataset::{DataTable, RecipeData, SourceMetadata};
pub use error::{MashtunError, Result};
pub use features::{compute_features, RecipeFeatures};
pub use session::{Command, Reply, ReviewSession};
pub use similarity::{RankedMatch, RatioRanker, SimilarityRanker};
pub use store::{IngredientMap, MapStore};
