//! Multi-round play state.

use super::evaluator::RoundEvaluator;
use super::record::{RoundRecord, SelectionStats, SessionContext, StrategyAction, StrategyStep};
use super::sink::{hand_off, RecordSink};
use super::types::Round;
use crate::error::{KnapsackError, Result};
use crate::generator::{create_rng, GeneratorConfig, ItemGenerator};
use crate::search::{OptimalSubset, RankedSubset};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

/// Pass/fail of one completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    pub round: u32,
    pub success: bool,
}

/// Aggregate over the completed rounds of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub rounds: usize,
    pub passed: usize,
    /// Percentage of rounds passed, `0.0` when no round was played.
    pub success_rate: f64,
}

/// The current round's true optimum and the full ranking behind it.
#[derive(Debug, Clone, Serialize)]
pub struct OptimalReport {
    pub optimal: OptimalSubset,
    pub candidates: Vec<RankedSubset>,
}

/// Drives consecutive rounds for one player.
///
/// Each transition builds a [`RoundRecord`], hands it to a [`RecordSink`]
/// on a best-effort basis, and records the outcome. Delivery failures are
/// logged and otherwise ignored.
///
/// # Usage
///
/// ```
/// use u_knapsack::generator::GeneratorConfig;
/// use u_knapsack::round::{CollectingSink, GameSession, SessionContext};
///
/// let mut session = GameSession::new(
///     GeneratorConfig::default().with_seed(3),
///     SessionContext::new("user", "session"),
/// );
/// let first = session.round().items()[0].id.clone();
/// session.toggle(&first).unwrap();
///
/// let sink = CollectingSink::new();
/// let record = session.next_round(&sink, chrono::Utc::now()).unwrap();
/// assert_eq!(record.round, 1);
/// assert_eq!(session.round_number(), 2);
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Debug)]
pub struct GameSession<R: Rng = StdRng> {
    generator: ItemGenerator,
    rng: R,
    context: SessionContext,
    round_number: u32,
    round: Round,
    selection: Vec<String>,
    strategy: Vec<StrategyStep>,
    revealed: Option<OptimalReport>,
    history: Vec<RoundOutcome>,
    finished: bool,
}

impl GameSession<StdRng> {
    /// Starts a session whose RNG is seeded from `config.seed`.
    pub fn new(config: GeneratorConfig, context: SessionContext) -> Self {
        let rng = create_rng(config.seed);
        Self::with_rng(config, context, rng)
    }
}

impl<R: Rng> GameSession<R> {
    /// Starts a session drawing rounds from `rng`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid.
    pub fn with_rng(config: GeneratorConfig, context: SessionContext, mut rng: R) -> Self {
        let generator = ItemGenerator::new(config);
        let round = generator.generate_with(&mut rng);
        tracing::info!(session = %context.session_id, "session started");
        Self {
            generator,
            rng,
            context,
            round_number: 1,
            round,
            selection: Vec::new(),
            strategy: Vec::new(),
            revealed: None,
            history: Vec::new(),
            finished: false,
        }
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Selected ids in the order they were added.
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn strategy(&self) -> &[StrategyStep] {
        &self.strategy
    }

    pub fn history(&self) -> &[RoundOutcome] {
        &self.history
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The report shown by the last [`reveal_optimal`](Self::reveal_optimal), if still shown.
    pub fn revealed(&self) -> Option<&OptimalReport> {
        self.revealed.as_ref()
    }

    /// Adds `id` to the selection, or removes it if already selected, and
    /// appends the corresponding strategy step. Returns whether the item is
    /// now selected.
    ///
    /// # Errors
    ///
    /// - [`KnapsackError::SessionFinished`] after [`quit`](Self::quit).
    /// - [`KnapsackError::UnknownItemId`] if `id` is not in the current round.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        self.ensure_active()?;
        let item = self
            .round
            .item(id)
            .ok_or_else(|| KnapsackError::UnknownItemId { id: id.to_string() })?;
        let item_name = item.name.clone();

        let action = match self.selection.iter().position(|s| s == id) {
            Some(pos) => {
                self.selection.remove(pos);
                StrategyAction::Removed
            }
            None => {
                self.selection.push(id.to_string());
                StrategyAction::Added
            }
        };
        self.strategy.push(StrategyStep { item_name, action });
        Ok(action == StrategyAction::Added)
    }

    /// Live statistics for the current selection.
    pub fn selection_stats(&self) -> SelectionStats {
        RoundEvaluator::evaluate_known(self.round.items(), &self.selection, self.round.threshold())
    }

    /// Shows or hides the optimal solution.
    ///
    /// Showing replaces the selection with the optimal members and returns
    /// the report. Hiding deselects those members again and returns `None`.
    /// Neither direction touches the strategy trace.
    pub fn reveal_optimal(&mut self) -> Option<&OptimalReport> {
        if let Some(report) = self.revealed.take() {
            let shown: Vec<&str> = report.optimal.ids();
            self.selection.retain(|id| !shown.contains(&id.as_str()));
            return None;
        }

        let report = OptimalReport {
            optimal: self.round.find_optimal(),
            candidates: self.round.rank_subsets(2),
        };
        self.selection = report
            .optimal
            .ids()
            .into_iter()
            .map(String::from)
            .collect();
        self.revealed = Some(report);
        self.revealed.as_ref()
    }

    /// Records the current round and moves on to a fresh one.
    ///
    /// # Errors
    ///
    /// [`KnapsackError::SessionFinished`] after [`quit`](Self::quit).
    pub fn next_round<S: RecordSink + ?Sized>(
        &mut self,
        sink: &S,
        timestamp: DateTime<Utc>,
    ) -> Result<RoundRecord> {
        let record = self.complete_round(sink, timestamp)?;

        self.round_number += 1;
        self.round = self.generator.generate_with(&mut self.rng);
        self.clear_round_state();
        tracing::info!(
            session = %self.context.session_id,
            round = self.round_number,
            "round started"
        );
        Ok(record)
    }

    /// Records the current round and ends the session.
    ///
    /// # Errors
    ///
    /// [`KnapsackError::SessionFinished`] if already quit.
    pub fn quit<S: RecordSink + ?Sized>(
        &mut self,
        sink: &S,
        timestamp: DateTime<Utc>,
    ) -> Result<RoundRecord> {
        let record = self.complete_round(sink, timestamp)?;
        self.round_number += 1;
        self.finished = true;
        let summary = self.summary();
        tracing::info!(
            session = %self.context.session_id,
            rounds = summary.rounds,
            passed = summary.passed,
            "session finished"
        );
        Ok(record)
    }

    pub fn summary(&self) -> SessionSummary {
        let rounds = self.history.len();
        let passed = self.history.iter().filter(|o| o.success).count();
        let success_rate = if rounds == 0 {
            0.0
        } else {
            passed as f64 / rounds as f64 * 100.0
        };
        SessionSummary {
            rounds,
            passed,
            success_rate,
        }
    }

    /// Starts over from round 1 with a fresh round and an empty history.
    pub fn restart(&mut self) {
        self.round_number = 1;
        self.round = self.generator.generate_with(&mut self.rng);
        self.history.clear();
        self.finished = false;
        self.clear_round_state();
        tracing::info!(session = %self.context.session_id, "session restarted");
    }

    fn complete_round<S: RecordSink + ?Sized>(
        &mut self,
        sink: &S,
        timestamp: DateTime<Utc>,
    ) -> Result<RoundRecord> {
        self.ensure_active()?;
        let record = RoundEvaluator::assemble_record(
            self.round_number,
            &self.round,
            &self.selection,
            &self.strategy,
            &self.context,
            timestamp,
        );
        hand_off(sink, &record);
        self.history.push(RoundOutcome {
            round: self.round_number,
            success: record.selection.success,
        });
        Ok(record)
    }

    fn clear_round_state(&mut self) {
        self.selection.clear();
        self.strategy.clear();
        self.revealed = None;
    }

    fn ensure_active(&self) -> Result<()> {
        if self.finished {
            Err(KnapsackError::SessionFinished)
        } else {
            Ok(())
        }
    }
}
