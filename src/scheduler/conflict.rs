//! Post-hoc conflict detection.
//!
//! Groups placed entries by the resource they hold in a slot and reports
//! every group with more than one member:
//! - **Room**: (slot, physical room), remote entries excluded.
//! - **Instructor**: (slot, primary instructor), blank names excluded.
//! - **Cohort**: (slot, cohort key), incomplete keys excluded.
//!
//! Placement already avoids all three, so conflicts normally come from the
//! pinned sub-schedule or from manual edits. Groups are emitted in slot
//! order and members in entry order, so repeated scans agree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{CohortKey, ScheduleEntry, TimeSlot};

/// Which uniqueness rule a group violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    Room,
    Instructor,
    Cohort,
}

/// Shared resource of a conflict group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConflictResource {
    Room(String),
    Instructor(String),
    Cohort(CohortKey),
}

/// Entries that hold the same resource in the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictGroup {
    /// Slot of the collision.
    pub slot: TimeSlot,
    /// The doubly-booked resource.
    pub resource: ConflictResource,
    /// Indices into the scanned entries, ascending.
    pub members: Vec<usize>,
}

impl ConflictGroup {
    /// Rule this group violates.
    pub fn kind(&self) -> ConflictKind {
        match self.resource {
            ConflictResource::Room(_) => ConflictKind::Room,
            ConflictResource::Instructor(_) => ConflictKind::Instructor,
            ConflictResource::Cohort(_) => ConflictKind::Cohort,
        }
    }

    /// Whether every member is pinned, so no member can be moved.
    ///
    /// `entries` must be the slice the group was detected in; a member
    /// index outside it counts as not pinned.
    pub fn is_fixed(&self, entries: &[ScheduleEntry]) -> bool {
        self.members
            .iter()
            .all(|&i| entries.get(i).is_some_and(ScheduleEntry::is_pinned))
    }
}

/// All conflict groups found in one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub room: Vec<ConflictGroup>,
    pub instructor: Vec<ConflictGroup>,
    pub cohort: Vec<ConflictGroup>,
}

impl ConflictReport {
    /// Whether no group was found.
    pub fn is_empty(&self) -> bool {
        self.room.is_empty() && self.instructor.is_empty() && self.cohort.is_empty()
    }

    /// Total number of groups.
    pub fn total(&self) -> usize {
        self.room.len() + self.instructor.len() + self.cohort.len()
    }

    /// Groups of one kind.
    pub fn groups(&self, kind: ConflictKind) -> &[ConflictGroup] {
        match kind {
            ConflictKind::Room => &self.room,
            ConflictKind::Instructor => &self.instructor,
            ConflictKind::Cohort => &self.cohort,
        }
    }

    /// Groups made up solely of pinned entries.
    pub fn residual<'a>(
        &'a self,
        entries: &'a [ScheduleEntry],
    ) -> impl Iterator<Item = &'a ConflictGroup> {
        self.room
            .iter()
            .chain(&self.instructor)
            .chain(&self.cohort)
            .filter(move |g| g.is_fixed(entries))
    }
}

/// Scans entries for all three kinds of conflict.
pub fn detect_conflicts(entries: &[ScheduleEntry]) -> ConflictReport {
    ConflictReport {
        room: detect(entries, ConflictKind::Room),
        instructor: detect(entries, ConflictKind::Instructor),
        cohort: detect(entries, ConflictKind::Cohort),
    }
}

/// Scans entries for conflicts of one kind.
pub fn detect(entries: &[ScheduleEntry], kind: ConflictKind) -> Vec<ConflictGroup> {
    let mut groups: BTreeMap<(TimeSlot, ConflictResource), Vec<usize>> = BTreeMap::new();
    for (i, entry) in entries.iter().enumerate() {
        let Some(slot) = entry.slot() else {
            continue;
        };
        if let Some(resource) = resource_of(entry, kind) {
            groups.entry((slot, resource)).or_default().push(i);
        }
    }
    groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|((slot, resource), members)| ConflictGroup {
            slot,
            resource,
            members,
        })
        .collect()
}

fn resource_of(entry: &ScheduleEntry, kind: ConflictKind) -> Option<ConflictResource> {
    match kind {
        ConflictKind::Room => {
            if entry.is_remote() {
                return None;
            }
            entry
                .physical_room()
                .filter(|r| !r.trim().is_empty())
                .map(|r| ConflictResource::Room(r.to_string()))
        }
        ConflictKind::Instructor => entry
            .section
            .instructor()
            .map(|n| ConflictResource::Instructor(n.to_string())),
        ConflictKind::Cohort => entry.section.cohort_key().map(ConflictResource::Cohort),
    }
}
