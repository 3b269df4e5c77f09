//! Round outcome records handed to the logging collaborator.

use crate::error::HandoffError;
use crate::round::AttributeVector;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Whether a selection toggle added or removed an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyAction {
    Added,
    Removed,
}

/// One entry of the player's strategy trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyStep {
    pub item_name: String,
    pub action: StrategyAction,
}

impl fmt::Display for StrategyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            StrategyAction::Added => "added",
            StrategyAction::Removed => "removed",
        };
        write!(f, "{} {}", self.item_name, verb)
    }
}

/// Opaque identifiers and client metadata supplied by the caller.
///
/// The core never inspects these; they pass straight into each record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    pub user_id: String,
    pub session_id: String,
    pub browser: String,
    pub device: String,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    pub fn with_browser(mut self, browser: impl Into<String>) -> Self {
        self.browser = browser.into();
        self
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }
}

/// Value, similarity, and verdict for a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionStats {
    /// Selected ids in round order.
    pub ids: Vec<String>,
    /// Selected names in round order.
    pub names: Vec<String>,
    pub value: u32,
    pub similarity: f64,
    /// `similarity >= threshold`.
    pub success: bool,
}

/// The round's true optimum, as reported alongside the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalSummary {
    pub names: Vec<String>,
    pub value: u32,
    pub similarity: f64,
}

/// Per-item fields of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemEntry {
    pub name: String,
    pub value: u32,
    pub attributes: AttributeVector,
    pub selected: bool,
}

/// Structured outcome of one round.
///
/// Built by [`RoundEvaluator`](super::RoundEvaluator); delivered through a
/// [`RecordSink`](super::RecordSink) as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundRecord {
    pub timestamp: DateTime<Utc>,
    pub context: SessionContext,
    pub round: u32,
    pub threshold: f64,
    pub selection: SelectionStats,
    pub strategy: Vec<String>,
    pub optimal: OptimalSummary,
    pub items: Vec<ItemEntry>,
}

impl RoundRecord {
    /// Flattens the record into the key-value layout the logging endpoint expects.
    ///
    /// `timestamp` is written as RFC 3339 in UTC (for example
    /// `2025-04-29T23:20:05+00:00`), not as a locale-formatted local time.
    /// Consumers that want a local rendering convert it themselves.
    pub fn to_flat_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("timestamp".into(), Value::from(self.timestamp.to_rfc3339()));
        map.insert("userId".into(), Value::from(self.context.user_id.clone()));
        map.insert(
            "sessionId".into(),
            Value::from(self.context.session_id.clone()),
        );
        map.insert("browser".into(), Value::from(self.context.browser.clone()));
        map.insert("device".into(), Value::from(self.context.device.clone()));
        map.insert("round".into(), Value::from(self.round));
        map.insert("totalValue".into(), Value::from(self.selection.value));
        map.insert(
            "similarity".into(),
            Value::from(format!("{:.4}", self.selection.similarity)),
        );
        map.insert("targetSimilarity".into(), Value::from(self.threshold));
        map.insert("success".into(), Value::from(self.selection.success));
        map.insert("strategy".into(), Value::from(self.strategy.join(", ")));
        map.insert(
            "finalSelection".into(),
            Value::from(self.selection.names.join(", ")),
        );
        map.insert(
            "optimalSet".into(),
            Value::from(self.optimal.names.join(", ")),
        );
        map.insert(
            "optimalValue".into(),
            Value::from(self.optimal.value.to_string()),
        );
        map.insert(
            "optimalSimilarity".into(),
            Value::from(format!("{:.4}", self.optimal.similarity)),
        );

        for (idx, entry) in self.items.iter().enumerate() {
            let k = idx + 1;
            let attributes = entry.attributes.map(|x| format!("{x:.2}")).join(", ");
            map.insert(format!("Project {k} Value"), Value::from(entry.value));
            map.insert(
                format!("Project {k} Attributes"),
                Value::from(format!("[{attributes}]")),
            );
            map.insert(
                format!("Project {k} Selected"),
                Value::from(if entry.selected { "Yes" } else { "No" }),
            );
        }
        map
    }

    /// Serializes [`to_flat_map`](Self::to_flat_map) as JSON text.
    pub fn to_payload(&self) -> Result<String, HandoffError> {
        Ok(serde_json::to_string(&Value::Object(self.to_flat_map()))?)
    }
}
