//! End-to-end timetable construction.
//!
//! # Algorithm
//!
//! 1. Validate the configuration, the sections and the pinned entries.
//! 2. Place sections in input order with [`place_one`], adding each result
//!    to the occupancy index before the next section is placed.
//! 3. Append the pinned sub-schedule.
//! 4. Repair conflicts with [`resolve_all`].
//! 5. Summarize what is left.
//!
//! Placement does not see the pinned entries; collisions with them are
//! repaired in step 4 by moving the non-pinned side.
//!
//! # Complexity
//! O(n * d * p * r) for placement where n=sections, d=days, p=periods,
//! r=rooms, plus O(k * n^2) for k resolver passes.

use log::{info, warn};
use thiserror::Error;

use crate::config::{ConfigError, SchedulerConfig};
use crate::models::{CourseSection, Schedule, ScheduleEntry};
use crate::validation::{self, ValidationError};

use super::{place_one, resolve_all, AvailabilityIndex, ConflictSummary, ResolveOutcome};

/// Why a run was rejected before scheduling started.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{} invalid input record(s)", .0.len())]
    Invalid(Vec<ValidationError>),
}

/// Input container for scheduling.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRequest {
    /// Sections to place, in placement order.
    pub sections: Vec<CourseSection>,
    /// Pre-placed entries that must not move.
    pub pinned: Vec<ScheduleEntry>,
}

impl ScheduleRequest {
    /// Creates a request with no pinned entries.
    pub fn new(sections: Vec<CourseSection>) -> Self {
        Self {
            sections,
            pinned: Vec::new(),
        }
    }

    /// Sets the pinned sub-schedule.
    pub fn with_pinned(mut self, pinned: Vec<ScheduleEntry>) -> Self {
        self.pinned = pinned;
        self
    }
}

/// A finished run.
#[derive(Debug, Clone)]
pub struct ScheduleRun {
    pub schedule: Schedule,
    pub outcome: ResolveOutcome,
    pub summary: ConflictSummary,
    /// Pinned entries dropped for repeating an earlier (slot, room).
    pub dropped_pinned: Vec<ScheduleEntry>,
}

/// Greedy first-fit timetabler with iterative conflict repair.
///
/// # Example
///
/// ```
/// use u_timetable::config::SchedulerConfig;
/// use u_timetable::models::{CourseSection, Day, Placement, Room, ScheduleEntry, TimeSlot};
/// use u_timetable::scheduler::{ScheduleRequest, Scheduler};
///
/// let sections = vec![
///     CourseSection::new("Informatika", 3, "A", "IF301", "Algorithms")
///         .with_instructor("Dr. Rahma"),
///     CourseSection::new("Informatika", 3, "A", "IF302", "Databases")
///         .with_instructor("Dr. Rahma"),
/// ];
/// let pinned = vec![ScheduleEntry::placed(
///     CourseSection::new("PWK", 3, "", "PW301", "Urban Design")
///         .with_instructor("Dr. Rahma")
///         .pinned(),
///     Placement::new(TimeSlot::new(Day::Monday, 1), Room::physical("3.5")),
/// )];
///
/// let scheduler = Scheduler::new(SchedulerConfig::default());
/// let run = scheduler.run(ScheduleRequest::new(sections).with_pinned(pinned)).unwrap();
///
/// assert!(run.summary.is_clean());
/// assert_eq!(run.schedule.len(), 3);
/// assert_eq!(run.schedule.entries_in_slot(TimeSlot::new(Day::Monday, 1)).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    /// Creates a scheduler.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Places sections in order, each one seeing all earlier placements.
    ///
    /// Sections with no feasible slot are kept as unplaced entries.
    pub fn place_all(&self, sections: &[CourseSection]) -> Schedule {
        let mut index = AvailabilityIndex::new();
        let mut schedule = Schedule::new();
        for section in sections {
            let entry = place_one(section, &index, &self.config);
            index.add(&entry);
            schedule.push(entry);
        }
        info!(
            "placed {} of {} sections",
            schedule.placed().count(),
            sections.len()
        );
        schedule
    }

    /// Runs the whole pipeline.
    ///
    /// # Errors
    /// [`ScheduleError::Config`] if the configuration is unusable,
    /// [`ScheduleError::Invalid`] with every bad record otherwise.
    pub fn run(&self, request: ScheduleRequest) -> Result<ScheduleRun, ScheduleError> {
        self.config.validate()?;

        let (pinned, dropped_pinned) = validation::dedup_pinned(request.pinned);
        let mut errors = Vec::new();
        if let Err(e) = validation::validate_sections(&request.sections, &self.config) {
            errors.extend(e);
        }
        if let Err(e) = validation::validate_pinned(&pinned, &self.config) {
            errors.extend(e);
        }
        if !errors.is_empty() {
            return Err(ScheduleError::Invalid(errors));
        }

        let mut schedule = self.place_all(&request.sections);
        schedule.extend(pinned);

        let outcome = resolve_all(
            &mut schedule.entries,
            &self.config,
            self.config.max_iterations,
        );
        let summary = ConflictSummary::calculate(&schedule);

        if summary.unplaced > 0 {
            warn!("{} sections could not be placed", summary.unplaced);
        }
        info!(
            "schedule ready: {} entries, {} conflict groups left ({} residual)",
            schedule.len(),
            summary.total_conflicts(),
            summary.residual_conflicts
        );

        Ok(ScheduleRun {
            schedule,
            outcome,
            summary,
            dropped_pinned,
        })
    }
}
