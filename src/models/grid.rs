//! Weekly time grid.
//!
//! The week is a fixed set of days, each split into five ordered
//! teaching periods. Every day shares the same period boundaries except
//! Friday, whose third period ends early for midday prayers.
//!
//! # Ordering
//! Days order Monday..Sunday (weekday block, then weekend block) and
//! periods order 1..5. `TimeSlot` orders by day, then period, which is the
//! search order used by placement.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CourseSection;

/// Number of teaching periods per day.
pub const PERIODS_PER_DAY: u8 = 5;

/// A day of the teaching week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// All days in search order.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Regular teaching days.
    pub const WEEKDAYS: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Days reserved for non-regular cohorts.
    pub const WEEKEND: [Day; 2] = [Day::Saturday, Day::Sunday];

    /// Whether this day belongs to the weekend block.
    #[inline]
    pub fn is_weekend(self) -> bool {
        matches!(self, Day::Saturday | Day::Sunday)
    }

    /// Parses a day name (case-insensitive, English).
    pub fn parse(name: &str) -> Option<Day> {
        let lower = name.trim().to_lowercase();
        Day::ALL
            .into_iter()
            .find(|d| d.name().to_lowercase() == lower)
    }

    /// English day name.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A clock interval [start, end) in minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockRange {
    /// Start (minutes after midnight, inclusive).
    pub start_min: u16,
    /// End (minutes after midnight, exclusive).
    pub end_min: u16,
}

impl ClockRange {
    /// Creates a range from hour/minute pairs.
    pub const fn hm(start_h: u16, start_m: u16, end_h: u16, end_m: u16) -> Self {
        Self {
            start_min: start_h * 60 + start_m,
            end_min: end_h * 60 + end_m,
        }
    }

    /// Length of the range in minutes.
    #[inline]
    pub fn duration_min(&self) -> u16 {
        self.end_min.saturating_sub(self.start_min)
    }

    /// Parses `HH:MM-HH:MM`, accepting `.` for `:` and an en dash for `-`.
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.replace('.', ":").replace('–', "-");
        let (start, end) = normalized.split_once('-')?;
        let start_min = parse_clock(start)?;
        let end_min = parse_clock(end)?;
        (end_min > start_min).then_some(Self { start_min, end_min })
    }
}

fn parse_clock(text: &str) -> Option<u16> {
    let (h, m) = text.trim().split_once(':')?;
    let h: u16 = h.trim().parse().ok()?;
    let m: u16 = m.trim().parse().ok()?;
    (h < 24 && m < 60).then_some(h * 60 + m)
}

impl fmt::Display for ClockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}–{:02}:{:02}",
            self.start_min / 60,
            self.start_min % 60,
            self.end_min / 60,
            self.end_min % 60
        )
    }
}

/// A teaching period number (1-based).
pub type Period = u8;

/// A (day, period) cell of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: Day,
    pub period: Period,
}

impl TimeSlot {
    /// Creates a slot.
    pub fn new(day: Day, period: Period) -> Self {
        Self { day, period }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} P{}", self.day, self.period)
    }
}

static REGULAR_PERIODS: [ClockRange; 5] = [
    ClockRange::hm(7, 30, 9, 0),
    ClockRange::hm(9, 0, 10, 30),
    ClockRange::hm(10, 30, 12, 0),
    ClockRange::hm(13, 0, 14, 30),
    ClockRange::hm(15, 0, 16, 30),
];

static FRIDAY_PERIODS: [ClockRange; 5] = [
    ClockRange::hm(7, 30, 9, 0),
    ClockRange::hm(9, 0, 10, 30),
    ClockRange::hm(10, 30, 11, 30),
    ClockRange::hm(13, 0, 14, 30),
    ClockRange::hm(15, 0, 16, 30),
];

/// Class-label markers identifying non-regular (weekend) cohorts.
const NON_REGULAR_MARKERS: [&str; 4] = [" NR", "NON REG", "NON-REG", "NONREG"];

/// Whether a class label denotes a non-regular cohort.
pub fn is_non_regular_label(label: &str) -> bool {
    let upper = label.trim().to_uppercase();
    upper == "NR" || NON_REGULAR_MARKERS.iter().any(|m| upper.contains(m))
}

/// Static grid plus the day policy that restricts sections to days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeGrid {
    /// Program tag whose sections run on a single fixed day.
    pub general_education_program: String,
    /// The fixed day for general-education sections.
    pub general_education_day: Day,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            general_education_program: "MKDU".to_string(),
            general_education_day: Day::Saturday,
        }
    }
}

impl TimeGrid {
    /// Creates a grid with the given general-education rule.
    pub fn new(general_education_program: impl Into<String>, general_education_day: Day) -> Self {
        Self {
            general_education_program: general_education_program.into(),
            general_education_day,
        }
    }

    /// Ordered periods and their clock ranges for a day.
    pub fn periods_for_day(day: Day) -> impl Iterator<Item = (Period, ClockRange)> {
        let table = if day == Day::Friday {
            &FRIDAY_PERIODS
        } else {
            &REGULAR_PERIODS
        };
        table
            .iter()
            .enumerate()
            .map(|(i, range)| (i as Period + 1, *range))
    }

    /// Clock range of a period on a day, if the period exists.
    pub fn clock_range(slot: TimeSlot) -> Option<ClockRange> {
        Self::periods_for_day(slot.day)
            .find(|(p, _)| *p == slot.period)
            .map(|(_, range)| range)
    }

    /// Whether the slot lies on the grid.
    pub fn contains(slot: TimeSlot) -> bool {
        (1..=PERIODS_PER_DAY).contains(&slot.period)
    }

    /// Maps a clock-range text (e.g. `"10:30-11:30"`) back to a period.
    pub fn period_for_clock(day: Day, text: &str) -> Option<Period> {
        let range = ClockRange::parse(text)?;
        Self::periods_for_day(day)
            .find(|(_, r)| *r == range)
            .map(|(p, _)| p)
    }

    /// Every slot of the week in search order.
    pub fn all_slots() -> impl Iterator<Item = TimeSlot> {
        Day::ALL.into_iter().flat_map(|day| {
            Self::periods_for_day(day).map(move |(period, _)| TimeSlot::new(day, period))
        })
    }

    /// Days a section may be scheduled on, in search order.
    ///
    /// 1. General-education program → the single configured day.
    /// 2. Non-regular flag or label → Saturday, Sunday.
    /// 3. Otherwise → Monday..Friday.
    pub fn allowed_days(&self, section: &CourseSection) -> Vec<Day> {
        if section
            .program
            .trim()
            .eq_ignore_ascii_case(self.general_education_program.trim())
        {
            return vec![self.general_education_day];
        }
        if section.non_regular || is_non_regular_label(&section.class_label) {
            return Day::WEEKEND.to_vec();
        }
        Day::WEEKDAYS.to_vec()
    }
}
