//! Input validation at the scheduling boundary.
//!
//! Loaders hand the core two collections: course sections to place and
//! the pinned sub-schedule. Both are checked here so the core can assume
//! well-formed data. Detects:
//! - Missing cohort components (program, class label)
//! - Semesters outside `1..=max_semester`
//! - Pinned flags on the wrong collection
//! - Pinned entries that are unplaced or off the grid
//! - Pinned entries sharing a (slot, room)

use std::collections::HashSet;

use log::warn;
use thiserror::Error;

use crate::config::SchedulerConfig;
use crate::models::{CourseSection, ScheduleEntry, TimeGrid, TimeSlot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind:?}: {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Program or class label is blank.
    MissingCohortComponent,
    /// Semester is zero or above the configured maximum.
    InvalidSemester,
    /// A section to place carries the pinned flag.
    UnexpectedPinnedFlag,
    /// A pinned entry lacks the pinned flag.
    MissingPinnedFlag,
    /// A pinned entry has no placement.
    UnplacedPinnedEntry,
    /// A pinned entry's period does not exist.
    OffGridSlot,
    /// Two pinned entries share a (slot, room).
    DuplicatePinnedSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn describe(section: &CourseSection) -> String {
    format!(
        "{} {} '{}' (semester {}, class '{}')",
        section.program, section.course_code, section.title, section.semester, section.class_label
    )
}

fn check_semester(
    section: &CourseSection,
    config: &SchedulerConfig,
    errors: &mut Vec<ValidationError>,
) {
    if section.semester == 0 || section.semester > config.max_semester {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSemester,
            format!(
                "Semester {} out of range 1..={} for {}",
                section.semester,
                config.max_semester,
                describe(section)
            ),
        ));
    }
}

/// Validates the course sections to place.
///
/// Checks:
/// 1. Program and class label are non-blank
/// 2. Semester is within `1..=max_semester`
/// 3. The pinned flag is not set
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_sections(sections: &[CourseSection], config: &SchedulerConfig) -> ValidationResult {
    let mut errors = Vec::new();

    for section in sections {
        if section.program.trim().is_empty() || section.class_label.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingCohortComponent,
                format!("Missing program or class label for {}", describe(section)),
            ));
        }
        check_semester(section, config, &mut errors);
        if section.pinned {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnexpectedPinnedFlag,
                format!("Section to place is marked pinned: {}", describe(section)),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the pinned sub-schedule.
///
/// Pinned entries may leave the class label blank (the sub-schedule
/// identifies cohorts by semester only), but must be pinned, placed on the
/// grid, and must not share a (slot, physical room).
pub fn validate_pinned(pinned: &[ScheduleEntry], config: &SchedulerConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen: HashSet<(TimeSlot, String)> = HashSet::new();

    for entry in pinned {
        let section = &entry.section;
        if !section.pinned {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingPinnedFlag,
                format!("Pinned entry lacks the pinned flag: {}", describe(section)),
            ));
        }
        check_semester(section, config, &mut errors);

        let Some(slot) = entry.slot() else {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnplacedPinnedEntry,
                format!("Pinned entry has no slot: {}", describe(section)),
            ));
            continue;
        };
        if !TimeGrid::contains(slot) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OffGridSlot,
                format!("Period {} does not exist for {}", slot.period, describe(section)),
            ));
        }
        if let Some(room) = occupied_room(entry) {
            if !seen.insert((slot, room.to_string())) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicatePinnedSlot,
                    format!(
                        "{slot} room {room} already used by another pinned entry: {}",
                        describe(section)
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Drops pinned entries that repeat an earlier entry's (slot, room).
///
/// The first occurrence wins. Each drop is logged as a warning.
///
/// # Returns
/// `(kept, dropped)` in input order.
pub fn dedup_pinned(pinned: Vec<ScheduleEntry>) -> (Vec<ScheduleEntry>, Vec<ScheduleEntry>) {
    let mut seen: HashSet<(TimeSlot, String)> = HashSet::new();
    let mut kept = Vec::with_capacity(pinned.len());
    let mut dropped = Vec::new();

    for entry in pinned {
        let key = entry
            .slot()
            .zip(occupied_room(&entry).map(str::to_string));
        match key {
            Some(key) if !seen.insert(key.clone()) => {
                warn!(
                    "dropping pinned entry {} at {} room {}: slot already taken",
                    describe(&entry.section),
                    key.0,
                    key.1
                );
                dropped.push(entry);
            }
            _ => kept.push(entry),
        }
    }
    (kept, dropped)
}

fn occupied_room(entry: &ScheduleEntry) -> Option<&str> {
    if entry.is_remote() {
        None
    } else {
        entry.physical_room()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, Placement, Room};

    fn cfg() -> SchedulerConfig {
        SchedulerConfig::default()
    }

    fn pinned_at(code: &str, day: Day, period: u8, room: &str) -> ScheduleEntry {
        ScheduleEntry::placed(
            CourseSection::new("PWK", 3, "", code, "Urban Design").pinned(),
            Placement::new(TimeSlot::new(day, period), Room::physical(room)),
        )
    }

    #[test]
    fn test_valid_sections() {
        let sections = vec![
            CourseSection::new("Informatika", 1, "A", "IF101", "Intro"),
            CourseSection::new("Elektro", 7, "7A NR", "EL701", "Power Systems"),
        ];
        assert!(validate_sections(&sections, &cfg()).is_ok());
    }

    #[test]
    fn test_missing_cohort_component() {
        let sections = vec![
            CourseSection::new("", 3, "A", "X", "T"),
            CourseSection::new("P", 3, "  ", "Y", "T"),
        ];
        let errors = validate_sections(&sections, &cfg()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::MissingCohortComponent));
    }

    #[test]
    fn test_invalid_semester() {
        let sections = vec![
            CourseSection::new("P", 0, "A", "X", "T"),
            CourseSection::new("P", 15, "A", "Y", "T"),
        ];
        let errors = validate_sections(&sections, &cfg()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidSemester));
        assert!(errors[1].to_string().contains("15"));
    }

    #[test]
    fn test_pinned_flag_on_section() {
        let sections = vec![CourseSection::new("P", 3, "A", "X", "T").pinned()];
        let errors = validate_sections(&sections, &cfg()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::UnexpectedPinnedFlag);
    }

    #[test]
    fn test_valid_pinned() {
        let pinned = vec![
            pinned_at("PW1", Day::Monday, 1, "3.1"),
            pinned_at("PW2", Day::Monday, 1, "3.2"),
        ];
        assert!(validate_pinned(&pinned, &cfg()).is_ok());
    }

    #[test]
    fn test_pinned_problems() {
        let mut unflagged = pinned_at("PW3", Day::Monday, 2, "3.1");
        unflagged.section.pinned = false;
        let pinned = vec![
            pinned_at("PW1", Day::Monday, 1, "3.1"),
            pinned_at("PW2", Day::Monday, 1, "3.1"),
            unflagged,
            ScheduleEntry::unplaced(CourseSection::new("PWK", 3, "", "PW4", "T").pinned()),
            pinned_at("PW5", Day::Monday, 9, "3.1"),
        ];
        let errors = validate_pinned(&pinned, &cfg()).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::DuplicatePinnedSlot));
        assert!(kinds.contains(&ValidationErrorKind::MissingPinnedFlag));
        assert!(kinds.contains(&ValidationErrorKind::UnplacedPinnedEntry));
        assert!(kinds.contains(&ValidationErrorKind::OffGridSlot));
    }

    #[test]
    fn test_dedup_pinned_keeps_first() {
        let pinned = vec![
            pinned_at("PW1", Day::Tuesday, 2, "3.1"),
            pinned_at("PW2", Day::Tuesday, 2, "3.1"),
            pinned_at("PW3", Day::Tuesday, 2, "3.2"),
            pinned_at("PW4", Day::Tuesday, 3, "3.1"),
        ];
        let (kept, dropped) = dedup_pinned(pinned);
        let kept: Vec<_> = kept.iter().map(|e| e.section.course_code.as_str()).collect();
        assert_eq!(kept, vec!["PW1", "PW3", "PW4"]);
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].section.course_code, "PW2");
        let (single, _) = dedup_pinned(vec![pinned_at("A", Day::Friday, 1, "3.1")]);
        assert!(validate_pinned(&single, &cfg()).is_ok());
    }
}
