//! Per-declaration diagnostics for mapper runs
//!
//! The silent `to_internal` / `to_external` entry points discard these
//! outcomes after logging them; the `*_with_report` variants hand them back to
//! the caller as a [`MappingReport`].

use crate::error::Direction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to one declaration during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingOutcome {
    /// A value was written at the target path
    Applied,
    /// The source path resolved to nothing
    SkippedAbsent,
    /// The transform chose to produce no value
    SkippedByTransform,
    /// An existing value of the wrong kind blocked the write
    SkippedTypeMismatch,
}

impl MappingOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MappingOutcome::Applied)
    }
}

impl fmt::Display for MappingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MappingOutcome::Applied => "applied",
            MappingOutcome::SkippedAbsent => "skipped (absent)",
            MappingOutcome::SkippedByTransform => "skipped (transform)",
            MappingOutcome::SkippedTypeMismatch => "skipped (type mismatch)",
        };
        f.write_str(label)
    }
}

/// Outcome of one declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRecord {
    /// Position of the declaration in the mapper
    pub index: usize,
    /// Path read from
    pub source_path: String,
    /// Path written to
    pub target_path: String,
    pub outcome: MappingOutcome,
    /// Step at which a type mismatch stopped the write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch_step: Option<usize>,
}

/// Counts per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSummary {
    pub applied: usize,
    pub skipped_absent: usize,
    pub skipped_by_transform: usize,
    pub skipped_type_mismatch: usize,
}

impl MappingSummary {
    pub fn total(&self) -> usize {
        self.applied + self.skipped_absent + self.skipped_by_transform + self.skipped_type_mismatch
    }
}

/// Diagnostics for one mapper run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingReport {
    pub mapper: String,
    pub direction: Direction,
    pub created_at: DateTime<Utc>,
    pub records: Vec<MappingRecord>,
}

impl MappingReport {
    pub fn new(mapper: impl Into<String>, direction: Direction) -> Self {
        Self {
            mapper: mapper.into(),
            direction,
            created_at: Utc::now(),
            records: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: MappingRecord) {
        self.records.push(record);
    }

    pub fn summary(&self) -> MappingSummary {
        let mut summary = MappingSummary::default();
        for record in &self.records {
            match record.outcome {
                MappingOutcome::Applied => summary.applied += 1,
                MappingOutcome::SkippedAbsent => summary.skipped_absent += 1,
                MappingOutcome::SkippedByTransform => summary.skipped_by_transform += 1,
                MappingOutcome::SkippedTypeMismatch => summary.skipped_type_mismatch += 1,
            }
        }
        summary
    }

    /// Records that did not produce a value
    pub fn skipped(&self) -> impl Iterator<Item = &MappingRecord> {
        self.records.iter().filter(|record| !record.outcome.is_applied())
    }

    /// Whether any declaration was blocked by a structural mismatch
    pub fn has_mismatches(&self) -> bool {
        self.records
            .iter()
            .any(|record| record.outcome == MappingOutcome::SkippedTypeMismatch)
    }

    /// Human-readable report
    pub fn render(&self) -> String {
        let summary = self.summary();
        let mut report = String::new();

        report.push_str(&format!("=== Mapping Report: {} ({}) ===\n", self.mapper, self.direction));
        report.push_str(&format!("Created: {}\n", self.created_at.to_rfc3339()));
        report.push_str(&format!(
            "Declarations: {} (applied {}, absent {}, by transform {}, type mismatch {})\n\n",
            summary.total(),
            summary.applied,
            summary.skipped_absent,
            summary.skipped_by_transform,
            summary.skipped_type_mismatch
        ));

        for record in &self.records {
            report.push_str(&format!(
                "  [{}] {} -> {}: {}",
                record.index, record.source_path, record.target_path, record.outcome
            ));
            if let Some(step) = record.mismatch_step {
                report.push_str(&format!(" at step {}", step));
            }
            report.push('\n');
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, outcome: MappingOutcome) -> MappingRecord {
        MappingRecord {
            index,
            source_path: format!("src{}", index),
            target_path: format!("dst{}", index),
            outcome,
            mismatch_step: (outcome == MappingOutcome::SkippedTypeMismatch).then_some(1),
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut report = MappingReport::new("test", Direction::ToInternal);
        report.push(record(0, MappingOutcome::Applied));
        report.push(record(1, MappingOutcome::Applied));
        report.push(record(2, MappingOutcome::SkippedAbsent));
        report.push(record(3, MappingOutcome::SkippedTypeMismatch));

        let summary = report.summary();
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.skipped_absent, 1);
        assert_eq!(summary.skipped_type_mismatch, 1);
        assert_eq!(summary.total(), 4);
        assert_eq!(report.skipped().count(), 2);
        assert!(report.has_mismatches());
    }

    #[test]
    fn test_render_lists_every_record() {
        let mut report = MappingReport::new("anthropic-chat", Direction::ToExternal);
        report.push(record(0, MappingOutcome::Applied));
        report.push(record(1, MappingOutcome::SkippedTypeMismatch));

        let text = report.render();
        assert!(text.contains("anthropic-chat (to_external)"));
        assert!(text.contains("[0] src0 -> dst0: applied"));
        assert!(text.contains("[1] src1 -> dst1: skipped (type mismatch) at step 1"));
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        let json = serde_json::to_string(&MappingOutcome::SkippedByTransform).unwrap();
        assert_eq!(json, "\"skipped_by_transform\"");
    }
}
