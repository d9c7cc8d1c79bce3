//! Defines data structures for the application.
//!
//! Includes structs for:
//! - One line of the states file (`StateRecord`).
//! - A single ranked entry of the population chart (`PopulationEntry`).

use crate::error::{AppError, Result};
use std::fmt;
use tracing::debug;

/// Field separator used by the states file.
pub const FIELD_DELIMITER: char = ',';

/// Number of fields every line of the states file must carry.
pub const FIELD_COUNT: usize = 5;

/// Information about one U.S. state.
///
/// Field order matters: the derived `Ord` compares `name` first, so sorting a
/// collection of records orders it alphabetically by state name, falling back to
/// the remaining fields only when two names are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateRecord {
    pub name: String,
    pub capital: String,
    pub population: u64,
    pub flower_name: String,
    /// Path of the flower picture, relative to the flowers directory.
    pub flower_image: String,
}

impl StateRecord {
    /// Parses one line of the states file.
    ///
    /// The line is trimmed, then split on `FIELD_DELIMITER` into exactly
    /// `FIELD_COUNT` fields in the order
    /// `name,capital,population,flower_name,flower_image`.
    ///
    /// # Arguments
    ///
    /// * `line_number` - 1-based line number, used only for error reporting.
    /// * `line` - The raw line text.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MalformedRecord` if the field count is wrong or the
    /// population is not a non-negative integer.
    pub fn parse_line(line_number: usize, line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.trim().split(FIELD_DELIMITER).collect();
        if fields.len() != FIELD_COUNT {
            return Err(AppError::MalformedRecord {
                line: line_number,
                reason: format!(
                    "expected {} fields, found {}",
                    FIELD_COUNT,
                    fields.len()
                ),
            });
        }

        let population = fields[2]
            .trim()
            .parse::<u64>()
            .map_err(|e| AppError::MalformedRecord {
                line: line_number,
                reason: format!("invalid population {:?}: {}", fields[2], e),
            })?;

        debug!(line = line_number, state = fields[0], "Parsed state record");

        Ok(Self {
            name: fields[0].to_string(),
            capital: fields[1].to_string(),
            population,
            flower_name: fields[3].to_string(),
            flower_image: fields[4].to_string(),
        })
    }

    /// Case-insensitive comparison of this record's name against a user query.
    pub fn matches_name(&self, query: &str) -> bool {
        self.name.to_uppercase() == query.to_uppercase()
    }
}

impl fmt::Display for StateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.capital)
    }
}

/// A state name paired with its population, as plotted on the bar chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationEntry {
    pub name: String,
    pub population: u64,
}

impl PopulationEntry {
    pub fn new(name: impl Into<String>, population: u64) -> Self {
        Self {
            name: name.into(),
            population,
        }
    }
}
