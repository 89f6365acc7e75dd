//! Conflict summary.
//!
//! The record handed to report generators alongside the final schedule.
//!
//! | Field | Definition |
//! |-------|-----------|
//! | room_conflicts | (slot, room) groups with more than one in-person entry |
//! | instructor_conflicts | (slot, instructor) groups with more than one entry |
//! | cohort_conflicts | (slot, cohort) groups with more than one entry |
//! | residual_conflicts | groups made up solely of pinned entries |
//! | unplaced | entries without a slot |

use serde::{Deserialize, Serialize};

use crate::models::Schedule;

use super::detect_conflicts;

/// Counts describing the quality of a schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictSummary {
    pub room_conflicts: usize,
    pub instructor_conflicts: usize,
    pub cohort_conflicts: usize,
    /// Conflict groups no resolver pass can fix.
    pub residual_conflicts: usize,
    pub unplaced: usize,
    pub placed: usize,
    pub pinned: usize,
}

impl ConflictSummary {
    /// Computes the summary of a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let report = detect_conflicts(&schedule.entries);
        Self {
            room_conflicts: report.room.len(),
            instructor_conflicts: report.instructor.len(),
            cohort_conflicts: report.cohort.len(),
            residual_conflicts: report.residual(&schedule.entries).count(),
            unplaced: schedule.unplaced_count(),
            placed: schedule.placed().count(),
            pinned: schedule.pinned().count(),
        }
    }

    /// Total conflict groups of all kinds.
    pub fn total_conflicts(&self) -> usize {
        self.room_conflicts + self.instructor_conflicts + self.cohort_conflicts
    }

    /// Whether the schedule has no conflicts and no unplaced entries.
    pub fn is_clean(&self) -> bool {
        self.total_conflicts() == 0 && self.unplaced == 0
    }

    /// Whether the schedule stays within the given tolerances.
    pub fn meets_thresholds(&self, max_conflicts: usize, max_unplaced: usize) -> bool {
        self.total_conflicts() <= max_conflicts && self.unplaced <= max_unplaced
    }
}
