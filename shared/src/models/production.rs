//! Production batches and their state machine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One production run targeting a quantity of a specific block type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionBatch {
    pub id: Uuid,
    /// Format `BATCH-<4-digit-seq>`, unique across the system
    pub batch_number: String,
    pub block_id: Option<Uuid>,
    pub block_name: String,
    pub target_qty: i64,
    /// Grows monotonically while the batch is in progress; may exceed target
    pub produced_qty: i64,
    pub defects: i64,
    pub status: BatchStatus,
    pub cement_used: Decimal,
    pub sand_used: Decimal,
    pub aggregate_used: Decimal,
    pub color_used: Decimal,
    pub notes: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProductionBatch {
    /// Display progress, clamped to 100 even when over-producing
    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.produced_qty, self.target_qty)
    }
}

/// Batch lifecycle states
///
/// `Complete` is terminal. Resuming a paused batch is not wired up yet:
/// product intent for paused batches is unresolved, so the transition is
/// declared but every attempt is rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    InProgress,
    Complete,
    Paused,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::InProgress => "in_progress",
            BatchStatus::Complete => "complete",
            BatchStatus::Paused => "paused",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in_progress" => Some(BatchStatus::InProgress),
            "complete" => Some(BatchStatus::Complete),
            "paused" => Some(BatchStatus::Paused),
            _ => None,
        }
    }

    /// Legal transitions of the batch state machine
    pub fn can_transition_to(&self, next: BatchStatus) -> bool {
        matches!(
            (self, next),
            (BatchStatus::InProgress, BatchStatus::Complete)
                | (BatchStatus::InProgress, BatchStatus::Paused)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchStatus::Complete)
    }
}

/// Progress of produced against target, rounded and clamped to 100.
/// A zero target reads as 0% rather than dividing by zero.
pub fn progress_percent(produced_qty: i64, target_qty: i64) -> u8 {
    if target_qty <= 0 {
        return 0;
    }
    let pct = (produced_qty as f64 / target_qty as f64 * 100.0).round();
    pct.min(100.0).max(0.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamps_at_hundred() {
        assert_eq!(progress_percent(150, 100), 100);
        assert_eq!(progress_percent(100, 100), 100);
        assert_eq!(progress_percent(50, 100), 50);
    }

    #[test]
    fn progress_zero_target_is_zero() {
        assert_eq!(progress_percent(10, 0), 0);
    }

    #[test]
    fn progress_rounds() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
    }

    #[test]
    fn only_declared_transitions_allowed() {
        assert!(BatchStatus::InProgress.can_transition_to(BatchStatus::Complete));
        assert!(BatchStatus::InProgress.can_transition_to(BatchStatus::Paused));
        assert!(!BatchStatus::Paused.can_transition_to(BatchStatus::Complete));
        assert!(!BatchStatus::Paused.can_transition_to(BatchStatus::InProgress));
        assert!(!BatchStatus::Complete.can_transition_to(BatchStatus::InProgress));
        assert!(!BatchStatus::Complete.can_transition_to(BatchStatus::Paused));
    }
}
