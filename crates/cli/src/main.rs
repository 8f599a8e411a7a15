//! lift CLI - run routines as timed workouts and review history.

mod workout;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use lift_core::RoutineTemplate;
use lift_progress::{BasicHistoryTracker, HistoryTracker};
use lift_session::format_elapsed;
use lift_storage::{JsonStorage, RoutineProvider, WorkoutStore};

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Workout tracker", long_about = None)]
struct Cli {
    /// Data directory
    #[arg(long, default_value = ".lift")]
    data_dir: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a routine from a JSON file
    Import {
        /// Path to the routine JSON
        file: std::path::PathBuf,
    },
    /// List routines
    Routines,
    /// Run a routine as a workout
    Start {
        /// Routine ID
        id: u64,
    },
    /// List recorded workouts
    History {
        /// Only workouts of this routine
        #[arg(long)]
        routine: Option<u64>,
    },
    /// Show workout statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut storage = JsonStorage::new(&cli.data_dir).await?;

    match cli.command {
        Commands::Import { file } => {
            let json = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let routine: RoutineTemplate = serde_json::from_str(&json)?;
            let saved = storage.save_routine(&routine).await?;
            println!("Imported routine: {} - {}", saved.id, saved.name);
        }
        Commands::Routines => {
            let routines = storage.list_routines().await?;

            println!("Routines ({})", routines.len());
            for routine in routines {
                let sets: usize = routine
                    .items
                    .iter()
                    .filter_map(|item| item.exercise())
                    .map(|e| e.sets.len().max(1))
                    .sum();
                println!("  {} | {} | {} exercises, {} sets",
                    routine.id,
                    routine.name,
                    routine.exercise_count(),
                    sets,
                );
            }
        }
        Commands::Start { id } => {
            let Some(routine) = storage.load_routine(id).await? else {
                println!("Routine not found");
                return Ok(());
            };
            if routine.exercise_count() == 0 {
                println!("Routine has no exercises to run");
                return Ok(());
            }

            info!("Starting routine {}", routine.name);
            workout::run(routine, &mut storage).await?;
        }
        Commands::History { routine } => {
            let workouts = match routine {
                Some(routine_id) => {
                    BasicHistoryTracker::new(storage).routine_history(routine_id).await?
                }
                None => {
                    let mut all = storage.list_workouts().await?;
                    all.reverse();
                    all
                }
            };

            println!("Workouts ({})", workouts.len());
            for workout in workouts {
                println!("  {} | {} | {} | {} | feeling {}",
                    workout.id,
                    workout.started_at.format("%Y-%m-%d %H:%M"),
                    workout.routine_name,
                    format_elapsed(workout.duration_seconds),
                    workout.feeling,
                );
            }
        }
        Commands::Stats => {
            let stats = BasicHistoryTracker::new(storage).stats().await?;

            println!("Workouts: {}", stats.total_workouts);
            println!("Minutes: {}", stats.total_minutes);
            println!("Exercises: {}", stats.total_exercises);
            if let Some(routine) = stats.most_frequent_routine {
                println!("Favorite routine: {} ({}x)", routine.name, routine.count);
            }
            if let Some(exercise) = stats.most_frequent_exercise {
                println!("Favorite exercise: {} ({}x)", exercise.name, exercise.count);
            }
            for workout in &stats.recent_workouts {
                println!("  {} {}", workout.started_at.format("%Y-%m-%d"), workout.routine_name);
            }
        }
    }

    Ok(())
}
