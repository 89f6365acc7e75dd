//! Slot occupancy index.
//!
//! Three maps from `TimeSlot` to the instructors, physical rooms and
//! cohorts already busy in that slot. The index is a plain value derived
//! from a set of entries; callers rebuild it whenever that set changes.

use std::collections::{HashMap, HashSet};

use crate::models::{CohortKey, CourseSection, Placement, ScheduleEntry, TimeSlot};

/// Occupancy of every slot by instructors, rooms and cohorts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityIndex {
    instructors: HashMap<TimeSlot, HashSet<String>>,
    rooms: HashMap<TimeSlot, HashSet<String>>,
    cohorts: HashMap<TimeSlot, HashSet<CohortKey>>,
}

impl AvailabilityIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index over all placed entries.
    ///
    /// Unplaced entries are ignored. Rooms are recorded only for entries
    /// that are not remote; cohorts only when all three key components
    /// are present.
    pub fn build<'a>(entries: impl IntoIterator<Item = &'a ScheduleEntry>) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.add(entry);
        }
        index
    }

    /// Builds the index over every entry except the one at `skip`.
    pub fn build_excluding(entries: &[ScheduleEntry], skip: usize) -> Self {
        Self::build(
            entries
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, e)| e),
        )
    }

    /// Records one entry.
    pub fn add(&mut self, entry: &ScheduleEntry) {
        if let Some(placement) = &entry.placement {
            self.occupy(&entry.section, placement, entry.is_remote());
        }
    }

    fn occupy(&mut self, section: &CourseSection, placement: &Placement, remote: bool) {
        let slot = placement.slot;
        if let Some(name) = section.instructor() {
            self.instructors
                .entry(slot)
                .or_default()
                .insert(name.to_string());
        }
        if !remote {
            if let Some(room) = placement.room.id() {
                self.rooms.entry(slot).or_default().insert(room.to_string());
            }
        }
        if let Some(key) = section.cohort_key() {
            self.cohorts.entry(slot).or_default().insert(key);
        }
    }

    /// Whether an instructor already teaches in the slot.
    pub fn is_instructor_busy(&self, slot: TimeSlot, name: &str) -> bool {
        self.instructors
            .get(&slot)
            .is_some_and(|set| set.contains(name))
    }

    /// Whether a physical room is taken in the slot.
    pub fn is_room_occupied(&self, slot: TimeSlot, room: &str) -> bool {
        self.rooms.get(&slot).is_some_and(|set| set.contains(room))
    }

    /// Whether a cohort already attends something in the slot.
    pub fn is_cohort_busy(&self, slot: TimeSlot, key: &CohortKey) -> bool {
        self.cohorts.get(&slot).is_some_and(|set| set.contains(key))
    }

    /// Whether a section's instructor and cohort are both free in the slot.
    ///
    /// Rooms are not considered.
    pub fn is_section_free(&self, slot: TimeSlot, section: &CourseSection) -> bool {
        let instructor_busy = section
            .instructor()
            .is_some_and(|name| self.is_instructor_busy(slot, name));
        let cohort_busy = section
            .cohort_key()
            .is_some_and(|key| self.is_cohort_busy(slot, &key));
        !instructor_busy && !cohort_busy
    }

    /// Busy instructors in a slot, sorted.
    pub fn busy_instructors(&self, slot: TimeSlot) -> Vec<String> {
        sorted(self.instructors.get(&slot))
    }

    /// Occupied physical rooms in a slot, sorted.
    pub fn occupied_rooms(&self, slot: TimeSlot) -> Vec<String> {
        sorted(self.rooms.get(&slot))
    }

    /// Busy cohorts in a slot, sorted.
    pub fn busy_cohorts(&self, slot: TimeSlot) -> Vec<CohortKey> {
        sorted(self.cohorts.get(&slot))
    }
}

fn sorted<T: Clone + Ord>(set: Option<&HashSet<T>>) -> Vec<T> {
    let mut out: Vec<T> = set.map(|s| s.iter().cloned().collect()).unwrap_or_default();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, Room};

    fn slot(day: Day, period: u8) -> TimeSlot {
        TimeSlot::new(day, period)
    }

    fn entry(
        semester: u8,
        class: &str,
        instructor: &str,
        at: TimeSlot,
        room: Room,
    ) -> ScheduleEntry {
        let section = CourseSection::new("Elektro", semester, class, "EL", "Circuits")
            .with_instructor(instructor);
        ScheduleEntry::placed(section, Placement::new(at, room))
    }

    #[test]
    fn test_build_records_all_three_maps() {
        let s = slot(Day::Monday, 1);
        let entries = vec![entry(3, "A", "Ani", s, Room::physical("3.1"))];
        let index = AvailabilityIndex::build(&entries);

        assert!(index.is_instructor_busy(s, "Ani"));
        assert!(index.is_room_occupied(s, "3.1"));
        let key = entries[0].section.cohort_key().unwrap();
        assert!(index.is_cohort_busy(s, &key));

        let other = slot(Day::Monday, 2);
        assert!(!index.is_instructor_busy(other, "Ani"));
        assert!(!index.is_room_occupied(other, "3.1"));
    }

    #[test]
    fn test_remote_entry_occupies_no_room() {
        let s = slot(Day::Tuesday, 3);
        // Semester 1 is remote even when a room was recorded upstream.
        let entries = vec![entry(1, "A", "Ani", s, Room::physical("3.1"))];
        let index = AvailabilityIndex::build(&entries);
        assert!(!index.is_room_occupied(s, "3.1"));
        assert!(index.is_instructor_busy(s, "Ani"));
        assert!(index.occupied_rooms(s).is_empty());
    }

    #[test]
    fn test_unplaced_and_incomplete_entries() {
        let s = slot(Day::Monday, 1);
        let entries = vec![
            ScheduleEntry::unplaced(
                CourseSection::new("P", 3, "A", "C", "T").with_instructor("Ani"),
            ),
            entry(3, "", "", s, Room::physical("3.2")),
        ];
        let index = AvailabilityIndex::build(&entries);
        assert!(!index.is_instructor_busy(s, "Ani"));
        assert!(index.busy_instructors(s).is_empty());
        assert!(index.busy_cohorts(s).is_empty());
        assert_eq!(index.occupied_rooms(s), vec!["3.2".to_string()]);
    }

    #[test]
    fn test_build_excluding() {
        let s = slot(Day::Wednesday, 4);
        let entries = vec![
            entry(3, "A", "Ani", s, Room::physical("3.1")),
            entry(3, "B", "Budi", s, Room::physical("3.2")),
        ];
        let index = AvailabilityIndex::build_excluding(&entries, 0);
        assert!(!index.is_instructor_busy(s, "Ani"));
        assert!(index.is_instructor_busy(s, "Budi"));
        assert_eq!(index.occupied_rooms(s), vec!["3.2".to_string()]);
    }

    #[test]
    fn test_is_section_free() {
        let s = slot(Day::Thursday, 5);
        let entries = vec![entry(3, "A", "Ani", s, Room::physical("3.1"))];
        let index = AvailabilityIndex::build(&entries);

        let same_instructor =
            CourseSection::new("Informatika", 5, "B", "X", "T").with_instructor("Ani");
        let same_cohort = CourseSection::new("Elektro", 3, "A", "Y", "T").with_instructor("Citra");
        let unrelated = CourseSection::new("Elektro", 3, "B", "Z", "T").with_instructor("Citra");

        assert!(!index.is_section_free(s, &same_instructor));
        assert!(!index.is_section_free(s, &same_cohort));
        assert!(index.is_section_free(s, &unrelated));
    }

    #[test]
    fn test_incremental_add_matches_build() {
        let entries = vec![
            entry(3, "A", "Ani", slot(Day::Monday, 1), Room::physical("3.1")),
            entry(5, "B", "Budi", slot(Day::Friday, 3), Room::physical("3.7")),
        ];
        let mut incremental = AvailabilityIndex::new();
        for e in &entries {
            incremental.add(e);
        }
        assert_eq!(incremental, AvailabilityIndex::build(&entries));
    }
}
