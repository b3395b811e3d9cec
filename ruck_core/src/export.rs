//! CSV export of the workout history.
//!
//! This is a read-only transform over already-loaded workouts; the
//! canonical storage format stays JSON. Column order is fixed and the
//! header is emitted even for an empty history.

use crate::{Result, Workout};
use chrono::SecondsFormat;
use std::io;
use std::path::Path;

/// Default name for the exported file
pub const DEFAULT_EXPORT_FILE_NAME: &str = "rucking_history.csv";

/// The fixed header row
const HEADER: [&str; 17] = [
    "ID",
    "Date",
    "Unit System",
    "Sex",
    "Age",
    "Body Weight",
    "Ruck Weight",
    "Distance",
    "Duration (Hours)",
    "Duration (Minutes)",
    "Terrain",
    "Incline (%)",
    "Total Calories",
    "Calories Per Hour",
    "METs",
    "Pace (min/unit)",
    "Pace (sec/unit)",
];

/// Write the given workouts as CSV to any writer.
///
/// One row per workout, newest first if the input list is; dates are
/// rendered as ISO-8601 and enums in their persisted lowercase
/// spelling.
pub fn write_csv<W: io::Write>(workouts: &[Workout], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for workout in workouts {
        csv_writer.write_record([
            workout.id.clone(),
            workout
                .date
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            workout.input.unit_system.as_str().to_string(),
            workout.input.sex.as_str().to_string(),
            workout.input.age.to_string(),
            workout.input.body_weight.to_string(),
            workout.input.ruck_weight.to_string(),
            workout.input.distance.to_string(),
            workout.input.duration_hours.to_string(),
            workout.input.duration_minutes.to_string(),
            workout.input.terrain.as_str().to_string(),
            workout.input.incline.to_string(),
            workout.result.total_calories.to_string(),
            workout.result.calories_per_hour.to_string(),
            workout.result.mets.to_string(),
            workout.pace.minutes.to_string(),
            workout.pace.seconds.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the workouts as CSV to a file, creating parent directories.
pub fn write_csv_file(workouts: &[Workout], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_csv(workouts, file)?;
    tracing::info!("Exported {} workouts to {:?}", workouts.len(), path);
    Ok(())
}
