//! Timetable construction and repair.
//!
//! # Algorithm
//!
//! `Scheduler` places each section at the first feasible (slot, room) of its
//! allowed days, merges the pinned sub-schedule, then repairs any room,
//! instructor or cohort double-booking by relocating non-pinned entries.
//! Placement is greedy and never backtracks; it trades optimality for a
//! fast, fully deterministic result.
//!
//! # Summary
//!
//! `ConflictSummary` counts the conflict groups and unplaced entries left
//! in a schedule for downstream reports.

mod conflict;
mod index;
mod placement;
mod resolver;
mod simple;
mod summary;

pub use conflict::{
    detect, detect_conflicts, ConflictGroup, ConflictKind, ConflictReport, ConflictResource,
};
pub use index::AvailabilityIndex;
pub use placement::{find_placement, place_one, room_in_slot};
pub use resolver::{resolve_all, ResolveOutcome, ResolveStatus};
pub use simple::{ScheduleError, ScheduleRequest, ScheduleRun, Scheduler};
pub use summary::ConflictSummary;
