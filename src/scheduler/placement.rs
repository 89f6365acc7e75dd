//! First-fit slot and room placement.
//!
//! # Algorithm
//!
//! For each allowed day (in order), for each period of that day (in order):
//! 1. Skip the slot if the primary instructor is busy there.
//! 2. Skip the slot if the cohort is busy there.
//! 3. Remote sections take the slot with no room.
//! 4. In-person sections take the first free room in pool order; if none
//!    is free the slot is skipped.
//!
//! The first accepted (slot, room) wins. If the whole search space is
//! exhausted the section comes back unplaced. The search never backtracks
//! and never looks at other sections, so the result depends only on the
//! section, the index and the configuration.
//!
//! # Complexity
//! O(d * p * r) where d=allowed days, p=periods per day, r=rooms.

use crate::config::SchedulerConfig;
use crate::models::{CourseSection, Placement, Room, RoomPool, ScheduleEntry, TimeGrid, TimeSlot};

use super::AvailabilityIndex;

/// Places one section against the current occupancy.
///
/// Returns a placed entry for the first feasible (slot, room), or an
/// unplaced entry when no combination in the allowed search space works.
///
/// # Example
///
/// ```
/// use u_timetable::config::SchedulerConfig;
/// use u_timetable::models::{CourseSection, Day, Room};
/// use u_timetable::scheduler::{place_one, AvailabilityIndex};
///
/// let config = SchedulerConfig::default();
/// let section = CourseSection::new("Informatika", 3, "A", "IF301", "Algorithms")
///     .with_instructor("Dr. Rahma");
///
/// let entry = place_one(&section, &AvailabilityIndex::new(), &config);
/// let placement = entry.placement.unwrap();
/// assert_eq!(placement.slot.day, Day::Monday);
/// assert_eq!(placement.slot.period, 1);
/// assert_eq!(placement.room, Room::physical("3.1"));
/// ```
pub fn place_one(
    section: &CourseSection,
    index: &AvailabilityIndex,
    config: &SchedulerConfig,
) -> ScheduleEntry {
    match find_placement(section, index, config) {
        Some(placement) => ScheduleEntry::placed(section.clone(), placement),
        None => ScheduleEntry::unplaced(section.clone()),
    }
}

/// First feasible placement for a section, if any.
pub fn find_placement(
    section: &CourseSection,
    index: &AvailabilityIndex,
    config: &SchedulerConfig,
) -> Option<Placement> {
    let grid = config.grid();
    grid.allowed_days(section).into_iter().find_map(|day| {
        TimeGrid::periods_for_day(day).find_map(|(period, _)| {
            let slot = TimeSlot::new(day, period);
            room_in_slot(section, slot, index, &config.rooms, None)
                .map(|room| Placement::new(slot, room))
        })
    })
}

/// Room a section would get in a specific slot, if the slot is feasible.
///
/// Returns `None` when the instructor or cohort is busy, or when an
/// in-person section finds no free room. A free `preferred` room is taken
/// before the pool is scanned; remote sections ignore it.
pub fn room_in_slot(
    section: &CourseSection,
    slot: TimeSlot,
    index: &AvailabilityIndex,
    rooms: &RoomPool,
    preferred: Option<&str>,
) -> Option<Room> {
    if !index.is_section_free(slot, section) {
        return None;
    }
    if section.is_remote() {
        return Some(Room::Remote);
    }
    if let Some(room) = preferred.filter(|r| !index.is_room_occupied(slot, r)) {
        return Some(Room::physical(room));
    }
    rooms
        .iter()
        .find(|room| !index.is_room_occupied(slot, room))
        .map(Room::physical)
}
