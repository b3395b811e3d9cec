//! Core domain types for the rucking calorie calculator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout input (the raw form values)
//! - Estimate results and pace
//! - Persisted workout records
//! - Per-field validation errors

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Input Enums
// ============================================================================

/// Measurement system the user enters values in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    Imperial,
    Metric,
}

impl UnitSystem {
    /// Canonical lowercase spelling, as persisted and exported
    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Metric => "metric",
        }
    }

    /// Short label for the native distance unit ("mi" or "km")
    pub fn distance_unit(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "mi",
            UnitSystem::Metric => "km",
        }
    }

    /// Short label for the native weight unit ("lbs" or "kg")
    pub fn weight_unit(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "lbs",
            UnitSystem::Metric => "kg",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "imperial" => Ok(UnitSystem::Imperial),
            "metric" => Ok(UnitSystem::Metric),
            other => Err(format!("unknown unit system: {}", other)),
        }
    }
}

/// Biological sex, used by the age/sex intensity factor
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(format!("unknown sex: {}", other)),
        }
    }
}

/// Walking surface, mapped to a fixed metabolic multiplier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    /// Paved road, track
    Paved,
    /// Dirt trail, grass
    Trail,
    /// Loose sand, snow
    Sand,
}

impl Terrain {
    pub fn as_str(self) -> &'static str {
        match self {
            Terrain::Paved => "paved",
            Terrain::Trail => "trail",
            Terrain::Sand => "sand",
        }
    }
}

impl FromStr for Terrain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paved" => Ok(Terrain::Paved),
            "trail" => Ok(Terrain::Trail),
            "sand" => Ok(Terrain::Sand),
            other => Err(format!("unknown terrain: {}", other)),
        }
    }
}

// ============================================================================
// Workout Input
// ============================================================================

/// The complete set of values describing one ruck to be estimated
///
/// Weights and distance are in the units named by `unit_system`; all
/// physiology math converts to metric internally.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInput {
    pub unit_system: UnitSystem,
    pub sex: Sex,
    pub age: u32,
    pub body_weight: f64,
    pub ruck_weight: f64,
    pub distance: f64,
    pub duration_hours: f64,
    pub duration_minutes: f64,
    pub terrain: Terrain,
    pub incline: f64,
}

impl Default for WorkoutInput {
    /// The baseline ruck: 180 lb walker, 35 lb pack, 5 miles in 1h30m
    /// on trail with a 2% grade.
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Imperial,
            sex: Sex::Male,
            age: 30,
            body_weight: 180.0,
            ruck_weight: 35.0,
            distance: 5.0,
            duration_hours: 1.0,
            duration_minutes: 30.0,
            terrain: Terrain::Trail,
            incline: 2.0,
        }
    }
}

impl WorkoutInput {
    /// Total duration in fractional hours
    pub fn total_duration_hours(&self) -> f64 {
        self.duration_hours + self.duration_minutes / 60.0
    }
}

// ============================================================================
// Derived Results
// ============================================================================

/// Output of one calorie estimation
///
/// `mets` is already rounded to one decimal for display; the calorie
/// fields were computed from the unrounded value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub total_calories: i64,
    pub calories_per_hour: i64,
    pub mets: f64,
}

/// Time per native distance unit (minutes per mile or per kilometer)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pace {
    pub minutes: i64,
    /// Always in 0..=59; the constructor carries a rounded-up 60 into
    /// the minutes field.
    pub seconds: i64,
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

// ============================================================================
// Persisted Workout Record
// ============================================================================

/// A saved workout: input, result and pace snapshotted at save time
///
/// Immutable once created. The history store only inserts or removes
/// whole records.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: String,
    pub date: DateTime<Utc>,
    pub input: WorkoutInput,
    pub result: EstimateResult,
    pub pace: Pace,
}

impl Workout {
    /// Snapshot the given input/result/pace into a new record stamped
    /// with the current time.
    ///
    /// The id is the creation timestamp plus a short random suffix, so
    /// two saves inside the same clock tick still get distinct ids.
    pub fn new(input: WorkoutInput, result: EstimateResult, pace: Pace) -> Self {
        let date = Utc::now();
        Self::with_date(date, input, result, pace)
    }

    /// Like [`Workout::new`] but with an explicit timestamp (for tests)
    pub fn with_date(
        date: DateTime<Utc>,
        input: WorkoutInput,
        result: EstimateResult,
        pace: Pace,
    ) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        let id = format!(
            "{}-{}",
            date.to_rfc3339_opts(SecondsFormat::Millis, true),
            &suffix[..8]
        );
        Self {
            id,
            date,
            input,
            result,
            pace,
        }
    }
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Input field names, used to key validation messages
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    BodyWeight,
    RuckWeight,
    Distance,
    DurationHours,
    DurationMinutes,
    Incline,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::BodyWeight => "body_weight",
            Field::RuckWeight => "ruck_weight",
            Field::Distance => "distance",
            Field::DurationHours => "duration_hours",
            Field::DurationMinutes => "duration_minutes",
            Field::Incline => "incline",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed validation messages
///
/// Absence of an entry means the field is valid; an empty map means the
/// whole input is acceptable. This is a value, never an `Err` - invalid
/// input is an expected state, not a failure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_serde_spelling_matches_persisted_format() {
        assert_eq!(
            serde_json::to_string(&UnitSystem::Imperial).unwrap(),
            "\"imperial\""
        );
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"female\"");
        assert_eq!(serde_json::to_string(&Terrain::Sand).unwrap(), "\"sand\"");
    }

    #[test]
    fn test_input_serializes_camel_case() {
        let json = serde_json::to_string(&WorkoutInput::default()).unwrap();
        assert!(json.contains("\"unitSystem\""));
        assert!(json.contains("\"ruckWeight\""));
        assert!(json.contains("\"durationMinutes\""));
    }

    #[test]
    fn test_terrain_from_str_roundtrip() {
        for terrain in [Terrain::Paved, Terrain::Trail, Terrain::Sand] {
            assert_eq!(terrain.as_str().parse::<Terrain>().unwrap(), terrain);
        }
        assert!("mud".parse::<Terrain>().is_err());
    }

    #[test]
    fn test_workout_ids_are_unique_within_a_tick() {
        let input = WorkoutInput::default();
        let result = EstimateResult {
            total_calories: 800,
            calories_per_hour: 533,
            mets: 6.5,
        };
        let pace = Pace {
            minutes: 18,
            seconds: 0,
        };

        let date = Utc::now();
        let a = Workout::with_date(date, input.clone(), result, pace);
        let b = Workout::with_date(date, input, result, pace);

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_total_duration_hours() {
        let input = WorkoutInput::default();
        assert!((input.total_duration_hours() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_pace_display_pads_seconds() {
        let pace = Pace {
            minutes: 18,
            seconds: 5,
        };
        assert_eq!(pace.to_string(), "18:05");
    }
}
