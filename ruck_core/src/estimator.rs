//! Calorie estimation for rucking workouts.
//!
//! The model starts from the MET value of level walking at the input
//! speed and scales it by load, incline, terrain and age/sex factors.
//! All physiology math runs in metric (kilograms, kilometers, hours);
//! unit conversion happens once on the way in.
//!
//! Estimation is pure: no state, no I/O, cheap enough to re-run on
//! every input change.

use crate::types::{EstimateResult, Field, Pace, Sex, Terrain, UnitSystem, ValidationErrors, WorkoutInput};

/// Pounds to kilograms
pub const LBS_TO_KG: f64 = 0.453592;

/// Miles to kilometers
pub const MILES_TO_KM: f64 = 1.60934;

/// Reference walking speed (km/h) at which level walking costs 3.5 METs
const REFERENCE_SPEED_KPH: f64 = 4.8;

/// Metabolic multiplier for a walking surface
pub fn terrain_multiplier(terrain: Terrain) -> f64 {
    match terrain {
        Terrain::Paved => 1.0,
        Terrain::Trail => 1.1,
        Terrain::Sand => 1.25,
    }
}

/// Check every input field against its bounds.
///
/// Returns a field-keyed message for each violated constraint. An empty
/// map means the input is acceptable. Never fails: invalid input is an
/// expected state reported by value.
pub fn validate(input: &WorkoutInput) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if input.age < 10 || input.age > 99 {
        errors.insert(Field::Age, "Must be between 10 and 99.");
    }

    if !(input.body_weight > 0.0) {
        errors.insert(Field::BodyWeight, "Must be positive.");
    }

    if !(input.ruck_weight >= 0.0) {
        errors.insert(Field::RuckWeight, "Cannot be negative.");
    }

    if !(input.distance > 0.0) {
        errors.insert(Field::Distance, "Must be positive.");
    }

    if !(input.duration_hours >= 0.0) {
        errors.insert(Field::DurationHours, "Cannot be negative.");
    }

    if !(input.duration_minutes >= 0.0) || input.duration_minutes > 59.0 {
        errors.insert(Field::DurationMinutes, "Must be 0-59.");
    }

    if !(input.total_duration_hours() > 0.0) {
        errors.insert(
            Field::DurationMinutes,
            "Total duration must be greater than zero.",
        );
    }

    if !(input.incline >= 0.0) {
        errors.insert(Field::Incline, "Cannot be negative.");
    }

    errors
}

/// Input values normalized to metric, with degenerate denominators
/// already ruled out.
struct MetricInput {
    body_kg: f64,
    ruck_kg: f64,
    distance_km: f64,
    hours: f64,
}

impl MetricInput {
    /// Convert to metric and re-check the denominators.
    ///
    /// Validation is the first line of defense, but this gate re-checks
    /// the post-conversion values so a boundary input can never reach
    /// the formula as a zero, negative or non-finite divisor. The
    /// negated comparisons also reject NaN.
    fn from_input(input: &WorkoutInput) -> Option<Self> {
        let (body_kg, ruck_kg, distance_km) = match input.unit_system {
            UnitSystem::Imperial => (
                input.body_weight * LBS_TO_KG,
                input.ruck_weight * LBS_TO_KG,
                input.distance * MILES_TO_KM,
            ),
            UnitSystem::Metric => (input.body_weight, input.ruck_weight, input.distance),
        };
        let hours = input.total_duration_hours();

        if !(body_kg > 0.0) || !(distance_km > 0.0) || !(hours > 0.0) || !(ruck_kg >= 0.0) {
            return None;
        }

        Some(Self {
            body_kg,
            ruck_kg,
            distance_km,
            hours,
        })
    }
}

/// Combined age and sex intensity factor.
///
/// Starts at 1.0; females get a 0.95 multiplier, and each year past 30
/// shaves 0.5% off, floored so the age term never drops below 0.8.
fn age_sex_factor(sex: Sex, age: u32) -> f64 {
    let mut factor = 1.0;
    if sex == Sex::Female {
        factor *= 0.95;
    }
    if age > 30 {
        factor *= (1.0 - f64::from(age - 30) * 0.005).max(0.8);
    }
    factor
}

/// Estimate calories for the given input.
///
/// Returns `None` when validation fails or when any metric-normalized
/// denominator collapses to zero or below; there is no error state.
pub fn estimate(input: &WorkoutInput) -> Option<EstimateResult> {
    if !validate(input).is_empty() {
        return None;
    }
    let metric = MetricInput::from_input(input)?;

    let speed_kph = metric.distance_km / metric.hours;

    let base_met = 3.5 * (speed_kph / REFERENCE_SPEED_KPH);
    let load_ratio = metric.ruck_kg / metric.body_kg;
    let load_factor = 1.0 + load_ratio * 2.0;
    let incline_factor = 1.0 + (input.incline / 100.0) * 5.0;
    let terrain_factor = terrain_multiplier(input.terrain);

    let mets = base_met
        * load_factor
        * incline_factor
        * terrain_factor
        * age_sex_factor(input.sex, input.age);

    // Calories use the unrounded METs; rounding is display-only and
    // happens last to avoid compounding error.
    let total_calories = mets * metric.body_kg * metric.hours;

    Some(EstimateResult {
        total_calories: total_calories.round() as i64,
        calories_per_hour: (total_calories / metric.hours).round() as i64,
        mets: (mets * 10.0).round() / 10.0,
    })
}

/// Compute pace in minutes per native distance unit.
///
/// Pace is per mile for imperial input and per kilometer for metric,
/// matching the unit the distance was entered in. `None` under the same
/// conditions as [`estimate`].
pub fn compute_pace(input: &WorkoutInput) -> Option<Pace> {
    if !validate(input).is_empty() {
        return None;
    }
    let metric = MetricInput::from_input(input)?;

    let total_minutes = metric.hours * 60.0;
    let native_distance = match input.unit_system {
        UnitSystem::Imperial => input.distance,
        UnitSystem::Metric => metric.distance_km,
    };
    let pace_min_per_unit = total_minutes / native_distance;

    let mut minutes = pace_min_per_unit.floor() as i64;
    let mut seconds = ((pace_min_per_unit - pace_min_per_unit.floor()) * 60.0).round() as i64;
    // Rounding can land on a full minute
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }

    Some(Pace { minutes, seconds })
}
