//! Interactive schedule edits.
//!
//! Small operations for tooling that adjusts a finished schedule by hand:
//! removing sections, listing free slots, inserting a section at a chosen
//! slot, and moving matching sections to a new slot. Every operation
//! rebuilds the occupancy index from the current entries before it reads
//! it, and none of them moves or removes a pinned entry.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::models::{
    ClockRange, CohortKey, CourseSection, Day, Placement, Schedule, ScheduleEntry, TimeGrid,
    TimeSlot,
};
use crate::scheduler::{find_placement, room_in_slot, AvailabilityIndex};

/// Removes every non-pinned section whose title contains `keyword`.
///
/// Matching is case-insensitive. With a `program` filter only sections of
/// that program are removed. A blank keyword removes nothing.
///
/// # Returns
/// The detached sections, in schedule order.
pub fn remove_by_keyword(
    schedule: &mut Schedule,
    keyword: &str,
    program: Option<&str>,
) -> Vec<CourseSection> {
    if keyword.trim().is_empty() {
        return Vec::new();
    }
    let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut schedule.entries)
        .into_iter()
        .partition(|e| {
            !e.is_pinned()
                && e.section.title_contains(keyword)
                && program.map_or(true, |p| e.section.in_program(p))
        });
    schedule.entries = kept;
    info!("removed {} sections matching '{}'", removed.len(), keyword);
    removed.into_iter().map(ScheduleEntry::into_section).collect()
}

/// Occupancy of one slot, as shown to a person picking a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub slot: TimeSlot,
    pub clock: ClockRange,
    /// Pool rooms not taken in this slot, in pool order.
    pub free_rooms: Vec<String>,
    pub busy_instructors: Vec<String>,
    pub busy_cohorts: Vec<CohortKey>,
}

impl AvailableSlot {
    /// Number of free pool rooms.
    pub fn free_room_count(&self) -> usize {
        self.free_rooms.len()
    }
}

/// Lists slots that can still take a section.
///
/// A slot is listed when at least one pool room is free, or when it falls
/// on a weekend, where sections may run remotely without a room.
pub fn find_available_slots(
    schedule: &Schedule,
    config: &SchedulerConfig,
    day: Option<Day>,
) -> Vec<AvailableSlot> {
    let index = AvailabilityIndex::build(&schedule.entries);
    let days = match day {
        Some(day) => vec![day],
        None => Day::ALL.to_vec(),
    };

    let mut slots = Vec::new();
    for day in days {
        for (period, clock) in TimeGrid::periods_for_day(day) {
            let slot = TimeSlot::new(day, period);
            let free_rooms: Vec<String> = config
                .rooms
                .iter()
                .filter(|room| !index.is_room_occupied(slot, room))
                .map(str::to_string)
                .collect();
            if free_rooms.is_empty() && !day.is_weekend() {
                continue;
            }
            slots.push(AvailableSlot {
                slot,
                clock,
                free_rooms,
                busy_instructors: index.busy_instructors(slot),
                busy_cohorts: index.busy_cohorts(slot),
            });
        }
    }
    slots
}

/// Where an inserted section ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertOutcome {
    /// Placed at the requested slot.
    Targeted(Placement),
    /// The target was missing or infeasible; placed first-fit instead.
    Fallback(Placement),
    /// No feasible slot at all.
    Unplaced,
}

impl InsertOutcome {
    /// Placement taken, if any.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            InsertOutcome::Targeted(p) | InsertOutcome::Fallback(p) => Some(p),
            InsertOutcome::Unplaced => None,
        }
    }
}

/// Adds a section, trying `target` first.
///
/// The target is taken when the instructor and cohort are free there and,
/// for in-person sections, a room is free: `target_room` if it is free,
/// else the first free pool room. A target bypasses the allowed-day rules
/// so operators can override them; otherwise the section is placed
/// first-fit. The entry is appended even when unplaced.
///
/// # Example
///
/// ```
/// use u_timetable::config::SchedulerConfig;
/// use u_timetable::models::{CourseSection, Day, Schedule, TimeSlot};
/// use u_timetable::tuning::{insert, InsertOutcome};
///
/// let config = SchedulerConfig::default();
/// let mut schedule = Schedule::new();
/// let section = CourseSection::new("Sipil", 5, "B", "SI501", "Hydrology")
///     .with_instructor("Ir. Bayu");
///
/// let target = TimeSlot::new(Day::Wednesday, 4);
/// let outcome = insert(&mut schedule, section, &config, Some(target), Some("3.7"));
/// assert!(matches!(outcome, InsertOutcome::Targeted(_)));
/// assert_eq!(schedule.entries[0].physical_room(), Some("3.7"));
/// ```
pub fn insert(
    schedule: &mut Schedule,
    section: CourseSection,
    config: &SchedulerConfig,
    target: Option<TimeSlot>,
    target_room: Option<&str>,
) -> InsertOutcome {
    let index = AvailabilityIndex::build(&schedule.entries);
    let (outcome, placement) = place_with_target(&section, &index, config, target, target_room);
    debug!("insert {} {}: {:?}", section.course_code, section.title, outcome);
    schedule.push(ScheduleEntry {
        section,
        placement,
    });
    outcome
}

fn place_with_target(
    section: &CourseSection,
    index: &AvailabilityIndex,
    config: &SchedulerConfig,
    target: Option<TimeSlot>,
    target_room: Option<&str>,
) -> (InsertOutcome, Option<Placement>) {
    let targeted = target
        .filter(|slot| TimeGrid::contains(*slot))
        .and_then(|slot| {
            room_in_slot(section, slot, index, &config.rooms, target_room)
                .map(|room| Placement::new(slot, room))
        });
    if let Some(placement) = targeted {
        return (InsertOutcome::Targeted(placement.clone()), Some(placement));
    }
    match find_placement(section, index, config) {
        Some(placement) => (InsertOutcome::Fallback(placement.clone()), Some(placement)),
        None => (InsertOutcome::Unplaced, None),
    }
}

/// Selects sections by case-insensitive substring filters.
///
/// All set filters must match. A matcher with no filters matches nothing,
/// and pinned sections never match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMatcher {
    pub title: Option<String>,
    pub program: Option<String>,
    pub class_label: Option<String>,
    pub course_code: Option<String>,
}

impl SectionMatcher {
    /// Creates a matcher with no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters on the course title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Filters on the program.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Filters on the class label.
    pub fn with_class_label(mut self, class_label: impl Into<String>) -> Self {
        self.class_label = Some(class_label.into());
        self
    }

    /// Filters on the course code.
    pub fn with_course_code(mut self, course_code: impl Into<String>) -> Self {
        self.course_code = Some(course_code.into());
        self
    }

    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.program.is_none()
            && self.class_label.is_none()
            && self.course_code.is_none()
    }

    /// Whether a section is selected: unpinned, and every set filter is a
    /// substring of the matching field.
    pub fn matches(&self, section: &CourseSection) -> bool {
        if section.pinned || self.is_empty() {
            return false;
        }
        field_contains(&self.title, &section.title)
            && field_contains(&self.program, &section.program)
            && field_contains(&self.class_label, &section.class_label)
            && field_contains(&self.course_code, &section.course_code)
    }
}

fn field_contains(filter: &Option<String>, value: &str) -> bool {
    filter
        .as_deref()
        .map_or(true, |f| value.to_lowercase().contains(&f.to_lowercase()))
}

/// Counts from one [`relocate`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocateReport {
    pub matched: usize,
    /// Landed on the requested slot.
    pub on_target: usize,
    /// Placed first-fit elsewhere.
    pub fell_back: usize,
    /// Left without a slot.
    pub unplaced: usize,
}

/// Moves every section the matcher selects to `target`.
///
/// All matched entries are detached first, then re-placed one by one in
/// schedule order with the same rules as [`insert`], so they compete only
/// with each other and with the entries left in place. Entries keep their
/// position in the schedule.
pub fn relocate(
    schedule: &mut Schedule,
    matcher: &SectionMatcher,
    config: &SchedulerConfig,
    target: TimeSlot,
) -> RelocateReport {
    let matched: Vec<usize> = schedule
        .entries
        .iter()
        .enumerate()
        .filter(|(_, e)| matcher.matches(&e.section))
        .map(|(i, _)| i)
        .collect();
    for &i in &matched {
        schedule.entries[i].placement = None;
    }

    let mut report = RelocateReport {
        matched: matched.len(),
        ..Default::default()
    };
    for &i in &matched {
        let index = AvailabilityIndex::build(&schedule.entries);
        let entry = &schedule.entries[i];
        let (outcome, placement) =
            place_with_target(&entry.section, &index, config, Some(target), None);
        match outcome {
            InsertOutcome::Targeted(_) => report.on_target += 1,
            InsertOutcome::Fallback(_) => report.fell_back += 1,
            InsertOutcome::Unplaced => report.unplaced += 1,
        }
        schedule.entries[i].placement = placement;
    }

    info!(
        "relocated {} sections to {}: {} on target, {} elsewhere, {} unplaced",
        report.matched, target, report.on_target, report.fell_back, report.unplaced
    );
    report
}
