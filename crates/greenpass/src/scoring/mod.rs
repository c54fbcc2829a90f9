//! The Green Index engine: input sanitization, capped and normalized
//! category scores, tier benefits, next-threshold gaps, and the greedy
//! planner that backsolves a spending plan for a target index.

mod config;
mod domain;
mod model;
mod planner;
mod sanitize;
mod session;
mod tiers;

pub use config::{CategoryCaps, CategoryWeights, ScoreConfig};
pub use domain::{SpendCategory, SpendInput, UnknownCategory};
pub use model::{compute, CategoryScores, CategoryShare, CategorySuggestions, ScoreResult};
pub use planner::{backsolve, AddedSpend, BacksolvePlan, BACKSOLVE_GUARD, BACKSOLVE_STEP};
pub use sanitize::sanitize;
pub use session::{UndoHistory, UNDO_CAPACITY};
pub use tiers::{benefit_window, next_target, NextTarget, TierBand, TIER_LADDER};

pub(crate) use domain::round_to;
