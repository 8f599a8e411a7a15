//! Interactive workout runner.

use std::sync::Arc;
use anyhow::Result;
use lift_core::RoutineTemplate;
use lift_session::{SessionConfig, SessionHandle, SessionSnapshot, SessionState};
use lift_storage::WorkoutStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

/// A line typed during a workout. Set numbers are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Status,
    Done(usize),
    Reps(usize, u32),
    Weight(usize, f64),
    Time(usize, u32),
    Note(String),
    Next { force: bool },
    Finish,
    Rate(u8),
    Notes(String),
    Save,
    Quit,
    Help,
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    let set = |arg: Option<&str>| -> Result<usize, String> {
        match arg.map(str::parse::<usize>) {
            Some(Ok(n)) if n > 0 => Ok(n - 1),
            _ => Err("expected a set number starting at 1".to_string()),
        }
    };

    match word {
        "" | "status" | "s" => Ok(Command::Status),
        "done" | "d" => Ok(Command::Done(set(args.next())?)),
        "reps" => {
            let set = set(args.next())?;
            let reps = args.next().and_then(|a| a.parse().ok()).ok_or("expected a rep count")?;
            Ok(Command::Reps(set, reps))
        }
        "weight" | "kg" => {
            let set = set(args.next())?;
            let weight = args.next().and_then(|a| a.parse().ok()).ok_or("expected a weight")?;
            Ok(Command::Weight(set, weight))
        }
        "time" => {
            let set = set(args.next())?;
            let secs = args.next().and_then(|a| a.parse().ok()).ok_or("expected seconds")?;
            Ok(Command::Time(set, secs))
        }
        "note" => Ok(Command::Note(rest.to_string())),
        "next" | "n" => Ok(Command::Next { force: false }),
        "next!" => Ok(Command::Next { force: true }),
        "finish" | "f" => Ok(Command::Finish),
        "rate" => {
            let rating = args.next().and_then(|a| a.parse().ok()).ok_or("expected a rating from 1 to 5")?;
            Ok(Command::Rate(rating))
        }
        "notes" => Ok(Command::Notes(rest.to_string())),
        "save" => Ok(Command::Save),
        "quit" | "q" => Ok(Command::Quit),
        "help" | "?" => Ok(Command::Help),
        other => Err(format!("unknown command '{}', type 'help'", other)),
    }
}

const HELP: &str = "\
  status              show the current exercise
  done <set>          toggle a set as done
  reps <set> <n>      record reps
  weight <set> <kg>   record weight
  time <set> <secs>   record duration
  note <text>         notes for the current exercise
  next                next exercise (all sets done)
  next!               next exercise regardless
  finish              end the workout
  rate <1-5>          how it felt
  notes <text>        workout notes
  save                save the workout
  quit                leave without saving";

/// Run a workout for `routine` on stdin/stdout, saving into `store`.
pub async fn run<S: WorkoutStore>(routine: RoutineTemplate, store: &mut S) -> Result<()> {
    let mut handle = SessionHandle::from_routine(Arc::new(routine), SessionConfig::default());
    let overview = handle.snapshot().await;
    println!("{} - {} exercises", overview.routine_name, overview.exercise_count);

    handle.start().await?;
    print_snapshot(&handle.snapshot().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        let current = handle.snapshot().await.current_exercise_index;
        let outcome = match command {
            Command::Status => Ok(()),
            Command::Done(set) => handle.toggle_set_completed(current, set).await.map(|_| ()),
            Command::Reps(set, reps) => handle.set_actual_reps(current, set, reps).await,
            Command::Weight(set, kg) => handle.set_actual_weight(current, set, kg).await,
            Command::Time(set, secs) => handle.set_actual_duration(current, set, secs).await,
            Command::Note(text) => handle.set_exercise_notes(current, text).await,
            Command::Next { force } => {
                if force || handle.snapshot().await.can_advance {
                    handle.advance_to_next_exercise().await.map(|_| ())
                } else {
                    println!("Finish every set first, or use 'next!'");
                    continue;
                }
            }
            Command::Finish => handle.complete().await,
            Command::Rate(rating) => handle.set_feeling(rating).await,
            Command::Notes(text) => {
                handle.set_notes(text).await;
                Ok(())
            }
            Command::Save => match handle.save(store).await {
                Ok(saved) => {
                    println!("Workout saved as #{}", saved.id);
                    return Ok(());
                }
                Err(e) => {
                    warn!("save failed: {}", e);
                    println!("Save failed, try 'save' again: {}", e);
                    continue;
                }
            },
            Command::Quit => {
                println!("Workout discarded");
                return Ok(());
            }
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
        };

        if let Err(e) = outcome {
            println!("{}", e);
            continue;
        }
        print_snapshot(&handle.snapshot().await);
    }

    Ok(())
}

fn print_snapshot(snapshot: &SessionSnapshot) {
    if snapshot.state == SessionState::Completed {
        println!(
            "Workout complete in {} ({}% of sets). Use 'rate', 'notes', then 'save'.",
            snapshot.elapsed_display, snapshot.progress_percent
        );
        return;
    }

    println!(
        "[{}] {}% | exercise {}/{}",
        snapshot.elapsed_display,
        snapshot.progress_percent,
        snapshot.current_exercise_index + 1,
        snapshot.exercise_count
    );
    let Some(exercise) = &snapshot.current_exercise else {
        return;
    };
    println!("  {} (rest {}s)", exercise.name, exercise.rest_time);
    for (i, set) in exercise.sets.iter().enumerate() {
        let mark = if set.completed { "x" } else { " " };
        if exercise.timed {
            println!("   [{}] {}: {}s @ {}kg", mark, i + 1, set.actual.duration, set.actual.weight);
        } else {
            println!("   [{}] {}: {} x {}kg", mark, i + 1, set.actual.reps, set.actual.weight);
        }
    }
    if !exercise.notes.is_empty() {
        println!("  notes: {}", exercise.notes);
    }
    if snapshot.can_advance {
        println!("  all sets done, 'next' to continue");
    } else if snapshot.is_last_exercise && exercise.complete {
        println!("  last exercise done, 'finish' to end");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_commands() {
        assert_eq!(parse_command("done 2"), Ok(Command::Done(1)));
        assert_eq!(parse_command("reps 1 8"), Ok(Command::Reps(0, 8)));
        assert_eq!(parse_command("weight 3 62.5"), Ok(Command::Weight(2, 62.5)));
        assert_eq!(parse_command("time 1 45"), Ok(Command::Time(0, 45)));
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_command("next"), Ok(Command::Next { force: false }));
        assert_eq!(parse_command("next!"), Ok(Command::Next { force: true }));
        assert_eq!(parse_command("  "), Ok(Command::Status));
        assert_eq!(parse_command("finish"), Ok(Command::Finish));
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_command("note felt easy"), Ok(Command::Note("felt easy".to_string())));
        assert_eq!(parse_command("rate 4"), Ok(Command::Rate(4)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("done 0").is_err());
        assert!(parse_command("done").is_err());
        assert!(parse_command("reps 1").is_err());
        assert!(parse_command("jump").is_err());
    }
}
