//! Rounds, selection scoring, and session flow.
//!
//! A [`Round`] is an immutable set of [`Item`]s plus a compatibility
//! threshold. [`RoundEvaluator`] scores a player's selection against it and
//! builds a [`RoundRecord`]; [`GameSession`] strings rounds together and
//! hands each record to a [`RecordSink`].
//!
//! # Scoring
//!
//! A selection passes when the average pairwise cosine similarity of its
//! attribute vectors reaches the threshold. Fewer than two items have
//! similarity `0.0` and never pass a positive threshold.

mod evaluator;
mod record;
mod session;
mod sink;
mod types;

pub use evaluator::RoundEvaluator;
pub use record::{
    ItemEntry, OptimalSummary, RoundRecord, SelectionStats, SessionContext, StrategyAction,
    StrategyStep,
};
pub use session::{GameSession, OptimalReport, RoundOutcome, SessionSummary};
pub use sink::{hand_off, CollectingSink, NullSink, RecordSink};
pub use types::{
    clamp_attribute, AttributeVector, Item, Round, ATTRIBUTE_MAX, ATTRIBUTE_MIN, MAX_ITEM_VALUE,
    VECTOR_DIM,
};
