//! Iterative conflict repair.
//!
//! # Algorithm
//!
//! Up to `max_iterations` passes:
//! 1. Detect conflicts; stop if there are none.
//! 2. For each room group, keep one member (the pinned one if present,
//!    else the first in entry order) and re-place every other movable
//!    member with [`place_one`] against an index of all remaining entries.
//! 3. Re-detect and do the same for instructor groups, then cohort groups.
//! 4. Stop early when a full pass moved nothing.
//!
//! A relocated member either lands in a slot where it collides with
//! nothing, or becomes unplaced. Pinned entries are never moved, so a
//! group of pinned entries only is reported as residual.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::models::ScheduleEntry;

use super::conflict::{detect, detect_conflicts, ConflictGroup, ConflictKind, ConflictReport};
use super::{place_one, AvailabilityIndex};

const PASS_ORDER: [ConflictKind; 3] = [
    ConflictKind::Room,
    ConflictKind::Instructor,
    ConflictKind::Cohort,
];

/// How a resolve run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveStatus {
    /// No conflicts remain.
    Clean,
    /// A pass moved nothing but conflicts remain (no movable member).
    Stalled,
    /// The iteration budget ran out with conflicts remaining.
    BudgetExhausted,
}

/// Result of [`resolve_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOutcome {
    pub status: ResolveStatus,
    /// Detection passes performed.
    pub iterations: usize,
    /// Entries whose placement changed.
    pub relocations: usize,
    /// Conflicts left after the last pass.
    pub remaining: ConflictReport,
}

impl ResolveOutcome {
    /// Whether the loop stopped on its own rather than on the budget.
    pub fn converged(&self) -> bool {
        self.status != ResolveStatus::BudgetExhausted
    }

    /// Whether no conflicts remain.
    pub fn is_clean(&self) -> bool {
        self.status == ResolveStatus::Clean
    }
}

/// Repairs conflicts in place, never touching pinned entries.
///
/// Entry order is preserved; only placements change.
///
/// # Example
///
/// ```
/// use u_timetable::config::SchedulerConfig;
/// use u_timetable::models::{CourseSection, Day, Placement, Room, ScheduleEntry, TimeSlot};
/// use u_timetable::scheduler::resolve_all;
///
/// let slot = TimeSlot::new(Day::Monday, 1);
/// let pinned = CourseSection::new("PWK", 3, "A", "PW301", "Urban Design").pinned();
/// let movable = CourseSection::new("Informatika", 3, "A", "IF301", "Algorithms");
/// let mut entries = vec![
///     ScheduleEntry::placed(movable, Placement::new(slot, Room::physical("3.1"))),
///     ScheduleEntry::placed(pinned, Placement::new(slot, Room::physical("3.1"))),
/// ];
///
/// let outcome = resolve_all(&mut entries, &SchedulerConfig::default(), 10);
/// assert!(outcome.is_clean());
/// assert_eq!(entries[1].slot(), Some(slot));
/// assert_ne!(entries[0].physical_room(), Some("3.1"));
/// ```
pub fn resolve_all(
    entries: &mut [ScheduleEntry],
    config: &SchedulerConfig,
    max_iterations: usize,
) -> ResolveOutcome {
    let mut iterations = 0;
    let mut relocations = 0;
    let mut stalled = false;

    for iteration in 0..max_iterations {
        let report = detect_conflicts(entries);
        iterations = iteration + 1;
        if report.is_empty() {
            break;
        }
        info!(
            "resolve pass {}: {} room, {} instructor, {} cohort conflict groups",
            iterations,
            report.room.len(),
            report.instructor.len(),
            report.cohort.len()
        );

        let mut moved = 0;
        for kind in PASS_ORDER {
            let groups = if kind == ConflictKind::Room {
                report.room.clone()
            } else {
                detect(entries, kind)
            };
            for group in &groups {
                moved += resolve_group(entries, group, config);
            }
        }
        relocations += moved;

        if moved == 0 {
            stalled = true;
            break;
        }
    }

    let remaining = detect_conflicts(entries);
    let status = if remaining.is_empty() {
        ResolveStatus::Clean
    } else if stalled {
        ResolveStatus::Stalled
    } else {
        ResolveStatus::BudgetExhausted
    };

    match status {
        ResolveStatus::Clean => info!(
            "resolve finished clean after {iterations} passes, {relocations} relocations"
        ),
        ResolveStatus::Stalled => {
            for group in remaining.residual(entries) {
                warn!(
                    "residual {:?} conflict at {} on {:?}: pinned entries {:?}",
                    group.kind(),
                    group.slot,
                    group.resource,
                    group.members
                );
            }
            warn!("resolve stalled with {} conflict groups left", remaining.total());
        }
        ResolveStatus::BudgetExhausted => warn!(
            "resolve budget of {max_iterations} passes exhausted with {} conflict groups left",
            remaining.total()
        ),
    }

    ResolveOutcome {
        status,
        iterations,
        relocations,
        remaining,
    }
}

/// Moves every movable non-keep member of a group. Returns the number moved.
fn resolve_group(
    entries: &mut [ScheduleEntry],
    group: &ConflictGroup,
    config: &SchedulerConfig,
) -> usize {
    // Earlier relocations in this pass may already have split the group.
    let members: Vec<usize> = detect(entries, group.kind())
        .into_iter()
        .find(|g| g.slot == group.slot && g.resource == group.resource)
        .map(|g| g.members)
        .unwrap_or_default();
    if members.len() < 2 {
        return 0;
    }

    let keep = members
        .iter()
        .copied()
        .find(|&i| entries[i].is_pinned())
        .unwrap_or(members[0]);

    let mut moved = 0;
    for &i in &members {
        if i == keep || entries[i].is_pinned() {
            continue;
        }
        if relocate_entry(entries, i, config) {
            moved += 1;
        }
    }
    moved
}

/// Re-places entry `i` against all other entries. Returns whether it moved.
pub(crate) fn relocate_entry(
    entries: &mut [ScheduleEntry],
    i: usize,
    config: &SchedulerConfig,
) -> bool {
    let index = AvailabilityIndex::build_excluding(entries, i);
    let replaced = place_one(&entries[i].section, &index, config);
    if replaced.placement == entries[i].placement {
        return false;
    }
    let section = &replaced.section;
    match &replaced.placement {
        Some(p) => debug!(
            "moved {} {} ({}) to {} {}",
            section.program, section.course_code, section.class_label, p.slot, p.room
        ),
        None => warn!(
            "no free slot left for {} {} ({}); entry is now unplaced",
            section.program, section.course_code, section.class_label
        ),
    }
    entries[i] = replaced;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseSection, Day, Placement, Room, RoomPool, TimeSlot};

    fn cfg() -> SchedulerConfig {
        SchedulerConfig::default()
    }

    fn placed(section: CourseSection, slot: TimeSlot, room: &str) -> ScheduleEntry {
        ScheduleEntry::placed(section, Placement::new(slot, Room::physical(room)))
    }

    fn sec(program: &str, class: &str, instructor: &str) -> CourseSection {
        CourseSection::new(program, 3, class, "C", "T").with_instructor(instructor)
    }

    #[test]
    fn test_clean_input_is_untouched() {
        let s = TimeSlot::new(Day::Monday, 1);
        let mut entries = vec![
            placed(sec("P", "A", "Ani"), s, "3.1"),
            placed(sec("P", "B", "Budi"), s, "3.2"),
        ];
        let before = entries.clone();
        let outcome = resolve_all(&mut entries, &cfg(), 10);
        assert_eq!(outcome.status, ResolveStatus::Clean);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.relocations, 0);
        assert_eq!(entries, before);
    }

    #[test]
    fn test_pinned_room_conflict_moves_only_movable() {
        let s = TimeSlot::new(Day::Monday, 1);
        let mut entries = vec![
            placed(sec("Informatika", "A", "Ani"), s, "3.1"),
            placed(sec("PWK", "", "Budi").pinned(), s, "3.1"),
        ];
        let pinned_before = entries[1].clone();

        let outcome = resolve_all(&mut entries, &cfg(), 10);
        assert!(outcome.is_clean());
        assert!(outcome.converged());
        assert_eq!(outcome.relocations, 1);
        assert_eq!(entries[1], pinned_before);
        // Same slot is still feasible, only the room changes.
        assert_eq!(entries[0].slot(), Some(s));
        assert_eq!(entries[0].physical_room(), Some("3.2"));
    }

    #[test]
    fn test_keep_first_without_pinned() {
        let s = TimeSlot::new(Day::Tuesday, 3);
        let mut entries = vec![
            placed(sec("P", "A", "Ani"), s, "3.1"),
            placed(sec("P", "B", "Ani"), s, "3.2"),
        ];
        let outcome = resolve_all(&mut entries, &cfg(), 10);
        assert!(outcome.is_clean());
        assert_eq!(entries[0].slot(), Some(s));
        assert_ne!(entries[1].slot(), Some(s));
        assert_eq!(entries[1].slot(), Some(TimeSlot::new(Day::Monday, 1)));
    }

    #[test]
    fn test_cohort_conflict_is_resolved() {
        let s = TimeSlot::new(Day::Wednesday, 2);
        let mut entries = vec![
            placed(sec("P", "A", "Ani"), s, "3.1"),
            placed(sec("P", "A", "Budi"), s, "3.2"),
        ];
        let outcome = resolve_all(&mut entries, &cfg(), 10);
        assert!(outcome.is_clean());
        assert_ne!(entries[0].slot(), entries[1].slot());
    }

    #[test]
    fn test_two_pinned_is_residual() {
        let s = TimeSlot::new(Day::Monday, 1);
        let mut entries = vec![
            placed(sec("PWK", "", "Ani").pinned(), s, "3.1"),
            placed(sec("PWK", "", "Budi").pinned(), s, "3.1"),
            placed(sec("Informatika", "A", "Citra"), s, "3.2"),
        ];
        let before = entries.clone();
        let outcome = resolve_all(&mut entries, &cfg(), 10);
        assert_eq!(outcome.status, ResolveStatus::Stalled);
        assert!(outcome.converged());
        assert_eq!(outcome.relocations, 0);
        assert_eq!(outcome.remaining.room.len(), 1);
        assert_eq!(outcome.remaining.residual(&entries).count(), 1);
        assert_eq!(entries, before);
    }

    #[test]
    fn test_unplaceable_member_becomes_unplaced() {
        // One room and one general-education day: the loser has nowhere to go
        // once every other Saturday period is taken by the same cohort.
        let config = cfg().with_rooms(RoomPool::new(["R1"]));
        let gened = |code: &str| CourseSection::new("MKDU", 3, "A", code, "Pancasila");
        let sat = |p| TimeSlot::new(Day::Saturday, p);
        let mut entries = vec![
            placed(gened("G1"), sat(1), "R1"),
            placed(gened("G2"), sat(1), "R1"),
            placed(gened("G3"), sat(2), "R1"),
            placed(gened("G4"), sat(3), "R1"),
            placed(gened("G5"), sat(4), "R1"),
            placed(gened("G6"), sat(5), "R1"),
        ];
        let outcome = resolve_all(&mut entries, &config, 10);
        assert!(outcome.is_clean());
        assert!(!entries[1].is_placed());
        assert_eq!(entries[0].slot(), Some(sat(1)));
    }

    #[test]
    fn test_budget_exhausted() {
        let s = TimeSlot::new(Day::Monday, 1);
        let mut entries = vec![
            placed(sec("P", "A", "Ani"), s, "3.1"),
            placed(sec("P", "B", "Budi"), s, "3.1"),
        ];
        let outcome = resolve_all(&mut entries, &cfg(), 0);
        assert_eq!(outcome.status, ResolveStatus::BudgetExhausted);
        assert!(!outcome.converged());
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.remaining.room.len(), 1);
    }

    #[test]
    fn test_budget_exhausted_after_productive_pass() {
        let s = TimeSlot::new(Day::Monday, 1);
        let mut entries = vec![
            placed(sec("PWK", "", "Ani").pinned(), s, "3.1"),
            placed(sec("PWK", "", "Budi").pinned(), s, "3.1"),
            placed(sec("Informatika", "A", "Citra"), s, "3.2"),
            placed(sec("Informatika", "B", "Citra"), s, "3.3"),
        ];

        let outcome = resolve_all(&mut entries, &cfg(), 1);
        assert_eq!(outcome.status, ResolveStatus::BudgetExhausted);
        assert!(!outcome.converged());
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.relocations, 1);
        assert_eq!(outcome.remaining.room.len(), 1);
        assert!(outcome.remaining.instructor.is_empty());
        assert_eq!(entries[3].slot(), Some(TimeSlot::new(Day::Monday, 2)));

        // Only the pinned pair is left, so a larger budget stalls at once.
        let outcome = resolve_all(&mut entries, &cfg(), 5);
        assert_eq!(outcome.status, ResolveStatus::Stalled);
        assert!(outcome.converged());
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.relocations, 0);
    }

    #[test]
    fn test_idempotent() {
        let s = TimeSlot::new(Day::Monday, 1);
        let mut entries = vec![
            placed(sec("P", "A", "Ani"), s, "3.1"),
            placed(sec("P", "B", "Ani"), s, "3.1"),
            placed(sec("P", "A", "Budi"), s, "3.2"),
            placed(sec("PWK", "", "Citra").pinned(), s, "3.2"),
        ];
        let first = resolve_all(&mut entries, &cfg(), 10);
        assert!(first.is_clean());
        let after_first = entries.clone();

        let second = resolve_all(&mut entries, &cfg(), 10);
        assert!(second.is_clean());
        assert_eq!(second.relocations, 0);
        assert_eq!(entries, after_first);
    }
}
