//! Course timetabling for multi-program academic institutions.
//!
//! Places course sections into a weekly grid of day and period slots and
//! physical rooms so that no room, primary instructor or student cohort is
//! double-booked, while keeping an externally authored sub-schedule fixed.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `CourseSection`, `TimeSlot`, `TimeGrid`,
//!   `Room`, `RoomPool`, `ScheduleEntry`, `Schedule`
//! - **`config`**: `SchedulerConfig`, loadable from TOML
//! - **`scheduler`**: Availability index, first-fit placement, conflict
//!   detection, iterative resolver, and the `Scheduler` pipeline
//! - **`tuning`**: Interactive edits (remove, insert, relocate, free slots)
//! - **`validation`**: Input integrity checks at the scheduling boundary
//!
//! # Architecture
//!
//! The core is a pure, single-threaded batch computation: identical inputs
//! produce identical schedules. Reading spreadsheets and writing reports
//! is left to callers.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod config;
pub mod models;
pub mod scheduler;
pub mod tuning;
pub mod validation;
