//! Timetabling domain models.
//!
//! Provides the data types for one weekly timetabling run: the fixed
//! time grid, the course sections to place, the room pool, and the
//! resulting schedule entries.
//!
//! # Domain Mappings
//!
//! | u-timetable | Meaning |
//! |-------------|---------|
//! | CourseSection | One course taught to one cohort |
//! | CohortKey | Students who must not be double-booked |
//! | TimeSlot | (day, period) cell of the weekly grid |
//! | Room | Physical room or remote delivery |
//! | ScheduleEntry | Section bound to a placement, or unplaced |

mod grid;
mod room;
mod schedule;
mod section;

pub use grid::{
    is_non_regular_label, ClockRange, Day, Period, TimeGrid, TimeSlot, PERIODS_PER_DAY,
};
pub use room::{Room, RoomPool};
pub use schedule::{Placement, Schedule, ScheduleEntry};
pub use section::{CohortKey, CourseSection, DeliveryMode, REMOTE_SEMESTER};
