//! Course section model.
//!
//! A course section is one schedulable teaching unit: a course taught to
//! one cohort by one primary instructor for one weekly period.
//!
//! # Conflict Identities
//! - **Cohort key** (program, semester, class label): students who must not
//!   be double-booked.
//! - **Primary instructor**: the only instructor checked for conflicts.
//!   The secondary instructor is a backup identity and never blocks a slot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semester delivered fully online.
pub const REMOTE_SEMESTER: u8 = 1;

/// How a section is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryMode {
    /// Needs a physical room.
    InPerson,
    /// Online; no room.
    Remote,
}

/// Identity of a student group for conflict checking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CohortKey {
    pub program: String,
    pub semester: u8,
    pub class_label: String,
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.program, self.semester, self.class_label)
    }
}

/// One schedulable teaching unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSection {
    /// Owning program (study programme).
    pub program: String,
    /// Semester number (1-based).
    pub semester: u8,
    /// Cohort / class label within the semester (e.g. "A", "3B NR").
    pub class_label: String,
    /// Course code.
    pub course_code: String,
    /// Course title.
    pub title: String,
    /// Credit hours.
    pub credits: u8,
    /// Instructor checked for conflicts.
    pub primary_instructor: Option<String>,
    /// Backup instructor; never checked for conflicts.
    pub secondary_instructor: Option<String>,
    /// Non-regular (weekend) cohort.
    pub non_regular: bool,
    /// Belongs to the externally authored sub-schedule.
    pub pinned: bool,
}

impl CourseSection {
    /// Creates a regular, unpinned section without instructors.
    pub fn new(
        program: impl Into<String>,
        semester: u8,
        class_label: impl Into<String>,
        course_code: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            semester,
            class_label: class_label.into(),
            course_code: course_code.into(),
            title: title.into(),
            credits: 0,
            primary_instructor: None,
            secondary_instructor: None,
            non_regular: false,
            pinned: false,
        }
    }

    /// Sets credit hours.
    pub fn with_credits(mut self, credits: u8) -> Self {
        self.credits = credits;
        self
    }

    /// Sets the primary instructor. Blank names are stored as `None`.
    pub fn with_instructor(mut self, name: impl Into<String>) -> Self {
        self.primary_instructor = non_blank(name.into());
        self
    }

    /// Sets the secondary (backup) instructor.
    pub fn with_secondary_instructor(mut self, name: impl Into<String>) -> Self {
        self.secondary_instructor = non_blank(name.into());
        self
    }

    /// Marks the section as non-regular.
    pub fn with_non_regular(mut self, non_regular: bool) -> Self {
        self.non_regular = non_regular;
        self
    }

    /// Marks the section as part of the pinned sub-schedule.
    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    /// Delivery mode derived from the semester.
    #[inline]
    pub fn delivery_mode(&self) -> DeliveryMode {
        if self.semester == REMOTE_SEMESTER {
            DeliveryMode::Remote
        } else {
            DeliveryMode::InPerson
        }
    }

    /// Whether the section is delivered online.
    #[inline]
    pub fn is_remote(&self) -> bool {
        self.delivery_mode() == DeliveryMode::Remote
    }

    /// Primary instructor, if present and non-empty.
    pub fn instructor(&self) -> Option<&str> {
        self.primary_instructor
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Cohort key, if all three components are present.
    pub fn cohort_key(&self) -> Option<CohortKey> {
        let program = self.program.trim();
        let class_label = self.class_label.trim();
        if program.is_empty() || class_label.is_empty() || self.semester == 0 {
            return None;
        }
        Some(CohortKey {
            program: program.to_string(),
            semester: self.semester,
            class_label: class_label.to_string(),
        })
    }

    /// Whether the title contains `keyword` (case-insensitive).
    pub fn title_contains(&self, keyword: &str) -> bool {
        self.title.to_lowercase().contains(&keyword.to_lowercase())
    }

    /// Whether the section belongs to `program` (case-insensitive).
    pub fn in_program(&self, program: &str) -> bool {
        self.program.trim().eq_ignore_ascii_case(program.trim())
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_builder() {
        let s = CourseSection::new("Informatika", 3, "A", "IF301", "Data Structures")
            .with_credits(3)
            .with_instructor("Dr. Rahma")
            .with_secondary_instructor("Budi");

        assert_eq!(s.program, "Informatika");
        assert_eq!(s.credits, 3);
        assert_eq!(s.instructor(), Some("Dr. Rahma"));
        assert_eq!(s.secondary_instructor.as_deref(), Some("Budi"));
        assert!(!s.pinned);
        assert!(!s.non_regular);
        assert_eq!(s.delivery_mode(), DeliveryMode::InPerson);
    }

    #[test]
    fn test_remote_semester() {
        let s = CourseSection::new("Informatika", 1, "A", "IF101", "Intro");
        assert!(s.is_remote());
        assert_eq!(s.delivery_mode(), DeliveryMode::Remote);
    }

    #[test]
    fn test_blank_instructor_is_none() {
        let s = CourseSection::new("P", 3, "A", "C", "T").with_instructor("   ");
        assert_eq!(s.primary_instructor, None);
        assert_eq!(s.instructor(), None);
    }

    #[test]
    fn test_cohort_key() {
        let s = CourseSection::new("ProgramX", 3, "ClassA", "X1", "T");
        let key = s.cohort_key().unwrap();
        assert_eq!(key.program, "ProgramX");
        assert_eq!(key.semester, 3);
        assert_eq!(key.class_label, "ClassA");
        assert_eq!(key.to_string(), "ProgramX 3ClassA");

        let missing = CourseSection::new("ProgramX", 3, "", "X1", "T");
        assert!(missing.cohort_key().is_none());
    }

    #[test]
    fn test_matching_helpers() {
        let s = CourseSection::new("Arsitektur", 7, "A", "AR701", "Skripsi");
        assert!(s.title_contains("SKRIPSI"));
        assert!(!s.title_contains("studio"));
        assert!(s.in_program("arsitektur"));
        assert!(!s.in_program("Elektro"));
    }
}
