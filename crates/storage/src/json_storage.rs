//! JSON file storage implementation.
//!
//! Stores routines and workouts as JSON files under a data directory and
//! keeps a single id sequence in `meta/sequence.json`. Ids are assigned
//! parent-first so child rows can point at the rows they belong to.

use std::path::{Path, PathBuf};
use lift_core::{EntityId, RecordKey, RecordRoutine, RoutineItemKind, RoutineTemplate};
use tokio::fs;
use tracing::debug;

use super::{Result, RoutineProvider, StorageError, WorkoutStore};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage, creating the data directories if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("routines")).await?;
        fs::create_dir_all(root.join("workouts")).await?;
        fs::create_dir_all(root.join("meta")).await?;

        Ok(Self { root })
    }

    fn routine_path(&self, id: EntityId) -> PathBuf {
        self.root.join("routines").join(format!("{}.json", id))
    }
    fn workout_path(&self, id: EntityId) -> PathBuf {
        self.root.join("workouts").join(format!("{}.json", id))
    }
    fn sequence_path(&self) -> PathBuf {
        self.root.join("meta").join("sequence.json")
    }

    /// Reserve the next id from the shared sequence.
    async fn next_id(&self) -> Result<EntityId> {
        let path = self.sequence_path();
        let mut last = 0u64;
        match fs::read_to_string(&path).await {
            Ok(s) => {
                let json: serde_json::Value = serde_json::from_str(&s)?;
                if let Some(v) = json.get("last_id").and_then(|v| v.as_u64()) {
                    last = v;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        let next = last + 1;
        let meta = serde_json::json!({"last_id": next, "updated_at": chrono::Utc::now()});
        fs::write(&path, serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(next)
    }

    async fn assign_if_unset(&self, id: &mut EntityId) -> Result<()> {
        if *id == 0 {
            *id = self.next_id().await?;
        }
        Ok(())
    }

    async fn assign_routine_ids(&self, routine: &mut RoutineTemplate) -> Result<()> {
        self.assign_if_unset(&mut routine.id).await?;
        for item in &mut routine.items {
            self.assign_if_unset(&mut item.id).await?;
            item.routine_id = routine.id;
            let exercises = match &mut item.kind {
                RoutineItemKind::Exercise(exercise) => vec![exercise],
                RoutineItemKind::SuperSet(superset) => {
                    self.assign_if_unset(&mut superset.id).await?;
                    vec![&mut superset.primary_exercise, &mut superset.secondary_exercise]
                }
            };
            for exercise in exercises {
                self.assign_if_unset(&mut exercise.id).await?;
                for set in &mut exercise.sets {
                    self.assign_if_unset(&mut set.id).await?;
                    set.exercise_id = exercise.id;
                }
            }
        }
        Ok(())
    }

    async fn assign_record_keys(&self, record: &mut RecordRoutine) -> Result<()> {
        let routine_key = RecordKey::Assigned(self.next_id().await?);
        record.id = routine_key;

        for item in &mut record.items {
            item.record_routine_id = routine_key;

            if let Some(exercise) = &mut item.record_exercise {
                let exercise_key = RecordKey::Assigned(self.next_id().await?);
                exercise.id = exercise_key;
                exercise.record_routine_id = routine_key;
                item.record_exercise_id = Some(exercise_key);

                for set in &mut exercise.record_sets {
                    set.id = RecordKey::Assigned(self.next_id().await?);
                    set.record_exercise_id = exercise_key;
                }
            }

            if let Some(superset) = &mut item.record_super_set {
                let superset_key = RecordKey::Assigned(self.next_id().await?);
                superset.id = superset_key;
                superset.record_routine_id = routine_key;
                item.record_super_set_id = Some(superset_key);
            }

            item.id = RecordKey::Assigned(self.next_id().await?);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RoutineProvider for JsonStorage {
    async fn save_routine(&mut self, routine: &RoutineTemplate) -> Result<RoutineTemplate> {
        let mut stored = routine.clone();
        self.assign_routine_ids(&mut stored).await?;

        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(self.routine_path(stored.id), json.as_bytes()).await?;

        debug!(routine = stored.id, "saved routine");
        Ok(stored)
    }

    async fn load_routine(&self, id: EntityId) -> Result<Option<RoutineTemplate>> {
        let routine: Option<RoutineTemplate> = read_json(&self.routine_path(id)).await?;
        Ok(routine.map(|mut r| {
            r.normalize_order();
            r
        }))
    }

    async fn list_routines(&self) -> Result<Vec<RoutineTemplate>> {
        let mut routines: Vec<RoutineTemplate> = list_dir(&self.root.join("routines")).await?;
        routines.sort_by_key(|r| r.id);
        Ok(routines)
    }
}

#[async_trait::async_trait]
impl WorkoutStore for JsonStorage {
    async fn save_workout(&mut self, record: &RecordRoutine) -> Result<RecordRoutine> {
        if record.id.is_assigned() {
            return Err(StorageError::Rejected(format!("workout {} is already saved", record.id)));
        }
        if record.items.is_empty() {
            return Err(StorageError::Rejected("workout has no items".to_string()));
        }

        let mut stored = record.clone();
        self.assign_record_keys(&mut stored).await?;

        let id = stored.id.get().ok_or_else(|| StorageError::Other("workout id not assigned".to_string()))?;
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(self.workout_path(id), json.as_bytes()).await?;

        debug!(workout = id, sets = stored.set_count(), "saved workout");
        Ok(stored)
    }

    async fn load_workout(&self, id: EntityId) -> Result<Option<RecordRoutine>> {
        read_json(&self.workout_path(id)).await
    }

    async fn list_workouts(&self) -> Result<Vec<RecordRoutine>> {
        let mut workouts = list_dir(&self.root.join("workouts")).await?;
        workouts.sort_by(|a: &RecordRoutine, b| a.started_at.cmp(&b.started_at));
        Ok(workouts)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}
