//! Scheduler configuration.
//!
//! Static inputs of a run: the room pool, the general-education day rule,
//! the resolver's iteration budget and the semester bound used by boundary
//! validation. Loadable from TOML; every field has a default.
//!
//! ```toml
//! rooms = ["3.1", "3.2", "3.3"]
//! max_iterations = 60
//! general_education_program = "MKDU"
//! general_education_day = "Saturday"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::{Day, RoomPool, TimeGrid};

/// Default resolver iteration budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 120;

/// Default highest accepted semester number.
pub const DEFAULT_MAX_SEMESTER: u8 = 14;

/// Errors raised while loading or checking a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration of a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Physical rooms in canonical search order.
    pub rooms: RoomPool,
    /// Resolver iteration budget.
    pub max_iterations: usize,
    /// Program tag restricted to a single day.
    pub general_education_program: String,
    /// The single day for the general-education program.
    pub general_education_day: Day,
    /// Highest semester accepted at the input boundary.
    pub max_semester: u8,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        let grid = TimeGrid::default();
        Self {
            rooms: RoomPool::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            general_education_program: grid.general_education_program,
            general_education_day: grid.general_education_day,
            max_semester: DEFAULT_MAX_SEMESTER,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the room pool.
    pub fn with_rooms(mut self, rooms: RoomPool) -> Self {
        self.rooms = rooms;
        self
    }

    /// Sets the resolver iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the general-education program and its day.
    pub fn with_general_education(mut self, program: impl Into<String>, day: Day) -> Self {
        self.general_education_program = program.into();
        self.general_education_day = day;
        self
    }

    /// Sets the highest accepted semester.
    pub fn with_max_semester(mut self, max_semester: u8) -> Self {
        self.max_semester = max_semester;
        self
    }

    /// The time grid with this configuration's day policy.
    pub fn grid(&self) -> TimeGrid {
        TimeGrid::new(
            self.general_education_program.clone(),
            self.general_education_day,
        )
    }

    /// Parses and checks a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and checks a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Rejects configurations that cannot drive a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rooms.is_empty() {
            return Err(ConfigError::Invalid("room pool is empty".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for room in self.rooms.iter() {
            if room.trim().is_empty() {
                return Err(ConfigError::Invalid("room pool has a blank room".into()));
            }
            if !seen.insert(room) {
                return Err(ConfigError::Invalid(format!("duplicate room '{room}'")));
            }
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid("max_iterations must be positive".into()));
        }
        if self.max_semester == 0 {
            return Err(ConfigError::Invalid("max_semester must be positive".into()));
        }
        Ok(())
    }
}
