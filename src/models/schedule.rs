//! Schedule (solution) model.
//!
//! A schedule is the collection of entries produced by one scheduling run.
//! Each entry binds a course section to a (slot, room) placement or marks
//! it as unplaced. Entries are never dropped implicitly: removal is always
//! an explicit operation that hands back the detached section.

use serde::{Deserialize, Serialize};

use super::{CohortKey, CourseSection, Day, Room, TimeGrid, TimeSlot};

/// Where and when a section is held.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub slot: TimeSlot,
    pub room: Room,
}

impl Placement {
    /// Creates a placement.
    pub fn new(slot: TimeSlot, room: Room) -> Self {
        Self { slot, room }
    }

    /// Creates a remote placement.
    pub fn remote(slot: TimeSlot) -> Self {
        Self::new(slot, Room::Remote)
    }
}

/// A course section bound to a placement, or explicitly unplaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// The scheduled section.
    pub section: CourseSection,
    /// `None` = unplaced.
    pub placement: Option<Placement>,
}

impl ScheduleEntry {
    /// Creates a placed entry.
    pub fn placed(section: CourseSection, placement: Placement) -> Self {
        Self {
            section,
            placement: Some(placement),
        }
    }

    /// Creates an unplaced entry.
    pub fn unplaced(section: CourseSection) -> Self {
        Self {
            section,
            placement: None,
        }
    }

    /// Assigned slot, if placed.
    #[inline]
    pub fn slot(&self) -> Option<TimeSlot> {
        self.placement.as_ref().map(|p| p.slot)
    }

    /// Assigned room, if placed.
    #[inline]
    pub fn room(&self) -> Option<&Room> {
        self.placement.as_ref().map(|p| &p.room)
    }

    /// Physical room identifier, if placed in a physical room.
    pub fn physical_room(&self) -> Option<&str> {
        self.room().and_then(Room::id)
    }

    /// Whether the entry is placed.
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    /// Whether the entry belongs to the pinned sub-schedule.
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.section.pinned
    }

    /// Whether the entry occupies no room: remote section or remote room.
    pub fn is_remote(&self) -> bool {
        self.section.is_remote() || self.room().is_some_and(Room::is_remote)
    }

    /// Detaches the section, discarding the placement.
    pub fn into_section(self) -> CourseSection {
        self.section
    }
}

/// The entries of one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule from existing entries.
    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Appends entries (e.g. the pinned sub-schedule).
    pub fn extend(&mut self, entries: impl IntoIterator<Item = ScheduleEntry>) {
        self.entries.extend(entries);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Placed entries.
    pub fn placed(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|e| e.is_placed())
    }

    /// Unplaced entries.
    pub fn unplaced(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|e| !e.is_placed())
    }

    /// Number of unplaced entries.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced().count()
    }

    /// Pinned entries.
    pub fn pinned(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|e| e.is_pinned())
    }

    /// Entries taught by a primary instructor.
    pub fn entries_for_instructor(&self, name: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.section.instructor() == Some(name))
            .collect()
    }

    /// Entries attended by a cohort.
    pub fn entries_for_cohort(&self, key: &CohortKey) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.section.cohort_key().as_ref() == Some(key))
            .collect()
    }

    /// Entries held in a slot.
    pub fn entries_in_slot(&self, slot: TimeSlot) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.slot() == Some(slot))
            .collect()
    }

    /// Entries of a program (case-insensitive).
    pub fn entries_for_program(&self, program: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.section.in_program(program))
            .collect()
    }

    /// Entries held on a day.
    pub fn entries_on_day(&self, day: Day) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.slot().is_some_and(|s| s.day == day))
            .collect()
    }

    /// Clock range label of an entry's slot, empty if unplaced.
    pub fn clock_label(entry: &ScheduleEntry) -> String {
        entry
            .slot()
            .and_then(TimeGrid::clock_range)
            .map(|r| r.to_string())
            .unwrap_or_default()
    }

    /// Entries in report order: day, period, room, program, semester,
    /// class label. Unplaced entries come last.
    pub fn sorted(&self) -> Vec<&ScheduleEntry> {
        let mut out: Vec<&ScheduleEntry> = self.entries.iter().collect();
        out.sort_by(|a, b| {
            let key = |e: &ScheduleEntry| {
                (
                    e.slot().is_none(),
                    e.slot(),
                    e.room().cloned(),
                    e.section.program.clone(),
                    e.section.semester,
                    e.section.class_label.clone(),
                )
            };
            key(a).cmp(&key(b))
        });
        out
    }
}
