use clap::{Args, Parser, Subcommand};
use ruck_core::comparison;
use ruck_core::estimator::LBS_TO_KG;
use ruck_core::export::DEFAULT_EXPORT_FILE_NAME;
use ruck_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ruck")]
#[command(about = "Rucking calorie calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate calories for a ruck (default)
    Estimate {
        #[command(flatten)]
        input: InputArgs,

        /// Save the workout to history after estimating
        #[arg(long)]
        save: bool,
    },

    /// List saved workouts, newest first
    History,

    /// Delete a saved workout by id
    Delete {
        /// Workout id, as shown by `ruck history`
        id: String,
    },

    /// Remove every saved workout
    Clear,

    /// Export the history as CSV
    Export {
        /// Output file (default: rucking_history.csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Workout input flags; anything omitted falls back to the configured
/// baseline.
#[derive(Args, Default)]
struct InputArgs {
    /// Unit system (imperial, metric)
    #[arg(long)]
    units: Option<UnitSystem>,

    /// Sex (male, female)
    #[arg(long)]
    sex: Option<Sex>,

    /// Age in years (10-99)
    #[arg(long)]
    age: Option<u32>,

    /// Body weight (lbs or kg per --units)
    #[arg(long)]
    body_weight: Option<f64>,

    /// Ruck weight (lbs or kg per --units)
    #[arg(long)]
    ruck_weight: Option<f64>,

    /// Distance (miles or km per --units)
    #[arg(long)]
    distance: Option<f64>,

    /// Duration: whole hours part
    #[arg(long)]
    hours: Option<f64>,

    /// Duration: minutes part (0-59)
    #[arg(long)]
    minutes: Option<f64>,

    /// Terrain (paved, trail, sand)
    #[arg(long)]
    terrain: Option<Terrain>,

    /// Incline as percent grade
    #[arg(long)]
    incline: Option<f64>,
}

impl InputArgs {
    fn apply_to(&self, baseline: WorkoutInput) -> WorkoutInput {
        WorkoutInput {
            unit_system: self.units.unwrap_or(baseline.unit_system),
            sex: self.sex.unwrap_or(baseline.sex),
            age: self.age.unwrap_or(baseline.age),
            body_weight: self.body_weight.unwrap_or(baseline.body_weight),
            ruck_weight: self.ruck_weight.unwrap_or(baseline.ruck_weight),
            distance: self.distance.unwrap_or(baseline.distance),
            duration_hours: self.hours.unwrap_or(baseline.duration_hours),
            duration_minutes: self.minutes.unwrap_or(baseline.duration_minutes),
            terrain: self.terrain.unwrap_or(baseline.terrain),
            incline: self.incline.unwrap_or(baseline.incline),
        }
    }
}

fn main() -> Result<()> {
    ruck_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);
    let store = HistoryStore::new(FileSlot::in_dir(&data_dir));

    match cli.command {
        Some(Commands::Estimate { input, save }) => {
            cmd_estimate(&store, &config, &input, save)
        }
        Some(Commands::History) => cmd_history(&store),
        Some(Commands::Delete { id }) => cmd_delete(&store, &id),
        Some(Commands::Clear) => cmd_clear(&store),
        Some(Commands::Export { output }) => cmd_export(&store, output),
        None => {
            // Default to an estimate of the configured baseline
            cmd_estimate(&store, &config, &InputArgs::default(), false)
        }
    }
}

fn cmd_estimate(
    store: &HistoryStore<FileSlot>,
    config: &Config,
    args: &InputArgs,
    save: bool,
) -> Result<()> {
    let input = args.apply_to(config.defaults.baseline());

    let errors = validate(&input);
    if !errors.is_empty() {
        eprintln!("Invalid input:");
        for (field, message) in errors.iter() {
            eprintln!("  {}: {}", field, message);
        }
        return Err(Error::Other("invalid input".into()));
    }

    let (result, pace) = match (estimate(&input), compute_pace(&input)) {
        (Some(result), Some(pace)) => (result, pace),
        _ => {
            println!("No result for this input.");
            return Ok(());
        }
    };

    display_estimate(&input, &result, &pace);

    if save {
        let workout = Workout::new(input, result, pace);
        let id = workout.id.clone();
        store.insert_front(workout);
        println!();
        println!("✓ Workout saved ({})", id);
    }

    Ok(())
}

fn display_estimate(input: &WorkoutInput, result: &EstimateResult, pace: &Pace) {
    let unit = input.unit_system.distance_unit();

    println!();
    println!(
        "  {} {} on {} terrain, {}% grade",
        input.distance,
        unit,
        input.terrain.as_str(),
        input.incline
    );
    println!(
        "  {} {} body, {} {} ruck, {}h {}m",
        input.body_weight,
        input.unit_system.weight_unit(),
        input.ruck_weight,
        input.unit_system.weight_unit(),
        input.duration_hours,
        input.duration_minutes
    );
    println!();
    println!("  Total calories:     {} kcal", result.total_calories);
    println!("  Calories per hour:  {} kcal/h", result.calories_per_hour);
    println!("  Intensity:          {} METs", result.mets);
    println!("  Pace:               {} /{}", pace, unit);

    let body_kg = match input.unit_system {
        UnitSystem::Imperial => input.body_weight * LBS_TO_KG,
        UnitSystem::Metric => input.body_weight,
    };
    let hours = input.total_duration_hours();

    println!();
    println!("  Same time, other activities:");
    for activity in comparison::compare_activities(body_kg, hours) {
        println!(
            "    {:<24} {:>5} kcal ({} METs)",
            activity.name, activity.calories, activity.mets
        );
    }

    let foods = comparison::food_quantities(result.total_calories);
    if !foods.is_empty() {
        println!();
        println!("  That burn covers:");
        for food in foods {
            println!("    {} {:.1} x {}", food.emoji, food.quantity, food.name);
        }
    }
}

fn cmd_history(store: &HistoryStore<FileSlot>) -> Result<()> {
    let workouts = store.load();

    if workouts.is_empty() {
        println!("No saved workouts yet.");
        return Ok(());
    }

    println!("{} saved workout(s):", workouts.len());
    println!();
    for workout in &workouts {
        let unit = workout.input.unit_system.distance_unit();
        println!(
            "  {}  {}  {} {}  {}h {}m  {} kcal",
            workout.id,
            workout.date.format("%Y-%m-%d %H:%M"),
            workout.input.distance,
            unit,
            workout.input.duration_hours,
            workout.input.duration_minutes,
            workout.result.total_calories
        );
    }

    Ok(())
}

fn cmd_delete(store: &HistoryStore<FileSlot>, id: &str) -> Result<()> {
    let existed = store.load().iter().any(|w| w.id == id);
    store.remove_by_id(id);

    if existed {
        println!("✓ Deleted workout {}", id);
    } else {
        println!("No workout with id {} - nothing to delete.", id);
    }

    Ok(())
}

fn cmd_clear(store: &HistoryStore<FileSlot>) -> Result<()> {
    store.clear();
    println!("✓ History cleared");
    Ok(())
}

fn cmd_export(store: &HistoryStore<FileSlot>, output: Option<PathBuf>) -> Result<()> {
    let workouts = store.load();
    let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE_NAME));

    write_csv_file(&workouts, &path)?;

    println!("✓ Exported {} workout(s)", workouts.len());
    println!("  CSV: {}", path.display());

    Ok(())
}
