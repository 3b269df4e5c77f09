//! Selection scoring and record assembly.

use super::record::{
    ItemEntry, OptimalSummary, RoundRecord, SelectionStats, SessionContext, StrategyStep,
};
use super::types::{AttributeVector, Item, Round};
use crate::error::{KnapsackError, Result};
use crate::vector::average_pairwise_similarity_fixed;
use chrono::{DateTime, Utc};

/// Scores a player's selection and assembles round records.
///
/// Stateless: everything is passed in and returned. Building a record never
/// delivers it; that is the caller's job (see [`hand_off`](super::hand_off)).
pub struct RoundEvaluator;

impl RoundEvaluator {
    /// Computes value, similarity, and pass/fail for the items whose ids are
    /// in `selection`. Duplicate ids count once; members keep round order.
    ///
    /// # Errors
    ///
    /// [`KnapsackError::UnknownItemId`] if `selection` names an id not in `items`.
    pub fn evaluate<S: AsRef<str>>(
        items: &[Item],
        selection: &[S],
        threshold: f64,
    ) -> Result<SelectionStats> {
        check_known(items, selection)?;
        Ok(Self::evaluate_known(items, selection, threshold))
    }

    /// Builds the outcome record for `round`.
    ///
    /// The optimum in the record is recomputed without size bounds, so it
    /// reflects what was actually achievable rather than the round's cached
    /// reference.
    ///
    /// # Errors
    ///
    /// [`KnapsackError::UnknownItemId`] if `selection` names an id not in the round.
    pub fn build_record<S: AsRef<str>>(
        round_number: u32,
        round: &Round,
        selection: &[S],
        strategy: &[StrategyStep],
        context: &SessionContext,
        timestamp: DateTime<Utc>,
    ) -> Result<RoundRecord> {
        check_known(round.items(), selection)?;
        Ok(Self::assemble_record(
            round_number,
            round,
            selection,
            strategy,
            context,
            timestamp,
        ))
    }

    pub(crate) fn evaluate_known<S: AsRef<str>>(
        items: &[Item],
        selection: &[S],
        threshold: f64,
    ) -> SelectionStats {
        let selected: Vec<&Item> = items
            .iter()
            .filter(|item| is_selected(item, selection))
            .collect();
        let vectors: Vec<&AttributeVector> = selected.iter().map(|item| &item.attributes).collect();
        let similarity = average_pairwise_similarity_fixed(&vectors);

        SelectionStats {
            ids: selected.iter().map(|item| item.id.clone()).collect(),
            names: selected.iter().map(|item| item.name.clone()).collect(),
            value: selected.iter().map(|item| item.value).sum(),
            similarity,
            success: similarity >= threshold,
        }
    }

    pub(crate) fn assemble_record<S: AsRef<str>>(
        round_number: u32,
        round: &Round,
        selection: &[S],
        strategy: &[StrategyStep],
        context: &SessionContext,
        timestamp: DateTime<Utc>,
    ) -> RoundRecord {
        let stats = Self::evaluate_known(round.items(), selection, round.threshold());
        let optimal = round.find_optimal();

        RoundRecord {
            timestamp,
            context: context.clone(),
            round: round_number,
            threshold: round.threshold(),
            selection: stats,
            strategy: strategy.iter().map(ToString::to_string).collect(),
            optimal: OptimalSummary {
                names: optimal.names().into_iter().map(String::from).collect(),
                value: optimal.value,
                similarity: optimal.similarity,
            },
            items: round
                .items()
                .iter()
                .map(|item| ItemEntry {
                    name: item.name.clone(),
                    value: item.value,
                    attributes: item.attributes,
                    selected: is_selected(item, selection),
                })
                .collect(),
        }
    }
}

fn is_selected<S: AsRef<str>>(item: &Item, selection: &[S]) -> bool {
    selection.iter().any(|id| id.as_ref() == item.id)
}

fn check_known<S: AsRef<str>>(items: &[Item], selection: &[S]) -> Result<()> {
    for id in selection {
        let id = id.as_ref();
        if !items.iter().any(|item| item.id == id) {
            return Err(KnapsackError::UnknownItemId { id: id.to_string() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::StrategyAction;
    use crate::search::{SearchConfig, SizeBounds};
    use chrono::TimeZone;

    fn scenario_round() -> Round {
        let items = vec![
            Item::new("a", "Project 1", 10, [1.0, 0.0, 0.0, 0.0, 0.0]),
            Item::new("b", "Project 2", 20, [1.0, 0.0, 0.0, 0.0, 0.0]),
            Item::new("c", "Project 3", 5, [0.0, 1.0, 0.0, 0.0, 0.0]),
        ];
        let config = SearchConfig::default().with_size_bounds(SizeBounds::new(2, 3));
        Round::new(items, 0.9, &config).unwrap()
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_evaluate_passing_selection() {
        let round = scenario_round();
        let stats =
            RoundEvaluator::evaluate(round.items(), &["b", "a"], round.threshold()).unwrap();

        assert_eq!(stats.ids, vec!["a", "b"]);
        assert_eq!(stats.value, 30);
        assert_eq!(stats.similarity, 1.0);
        assert!(stats.success);
    }

    #[test]
    fn test_evaluate_failing_selection() {
        let round = scenario_round();
        let stats =
            RoundEvaluator::evaluate(round.items(), &["a", "b", "c"], round.threshold()).unwrap();

        assert_eq!(stats.value, 35);
        assert!((stats.similarity - 1.0 / 3.0).abs() < 1e-12);
        assert!(!stats.success);
    }

    #[test]
    fn test_evaluate_empty_and_single() {
        let round = scenario_round();
        let empty: [&str; 0] = [];
        let stats = RoundEvaluator::evaluate(round.items(), &empty, 0.9).unwrap();
        assert_eq!(stats.value, 0);
        assert_eq!(stats.similarity, 0.0);
        assert!(!stats.success);

        let single = RoundEvaluator::evaluate(round.items(), &["c"], 0.9).unwrap();
        assert_eq!(single.value, 5);
        assert_eq!(single.similarity, 0.0);
    }

    #[test]
    fn test_evaluate_duplicates_count_once() {
        let round = scenario_round();
        let stats = RoundEvaluator::evaluate(round.items(), &["a", "a"], 0.9).unwrap();
        assert_eq!(stats.value, 10);
        assert_eq!(stats.ids.len(), 1);
    }

    #[test]
    fn test_evaluate_unknown_id() {
        let round = scenario_round();
        let err = RoundEvaluator::evaluate(round.items(), &["a", "zz"], 0.9).unwrap_err();
        assert_eq!(err, KnapsackError::UnknownItemId { id: "zz".into() });
    }

    #[test]
    fn test_build_record() {
        let round = scenario_round();
        let strategy = vec![
            StrategyStep {
                item_name: "Project 3".into(),
                action: StrategyAction::Added,
            },
            StrategyStep {
                item_name: "Project 3".into(),
                action: StrategyAction::Removed,
            },
            StrategyStep {
                item_name: "Project 1".into(),
                action: StrategyAction::Added,
            },
        ];
        let context = SessionContext::new("u", "s");
        let record =
            RoundEvaluator::build_record(2, &round, &["a"], &strategy, &context, timestamp())
                .unwrap();

        assert_eq!(record.round, 2);
        assert_eq!(record.context, context);
        assert_eq!(record.selection.value, 10);
        assert!(!record.selection.success);
        assert_eq!(
            record.strategy,
            vec!["Project 3 added", "Project 3 removed", "Project 1 added"]
        );
        assert_eq!(record.optimal.names, vec!["Project 1", "Project 2"]);
        assert_eq!(record.optimal.value, 30);
        assert_eq!(record.optimal.similarity, 1.0);
        assert_eq!(record.items.len(), 3);
        assert!(record.items[0].selected);
        assert!(!record.items[1].selected);
    }

    #[test]
    fn test_build_record_unknown_id() {
        let round = scenario_round();
        let result = RoundEvaluator::build_record(
            1,
            &round,
            &["nope"],
            &[],
            &SessionContext::default(),
            timestamp(),
        );
        assert!(result.is_err());
    }
}
