//! Routine model - the static workout template and its catalog entries.

use serde::{Deserialize, Serialize};
use crate::id::EntityId;

/// A reusable workout definition: ordered exercises and supersets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineTemplate {
    /// Backend identifier
    pub id: EntityId,

    /// Routine name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Items in execution order
    #[serde(default)]
    pub items: Vec<RoutineItem>,
}

impl RoutineTemplate {
    /// Create an empty routine.
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            items: Vec::new(),
        }
    }

    /// Append a single-exercise item.
    pub fn with_exercise(mut self, exercise: Exercise, rest_time: u32) -> Self {
        let order_index = self.items.len() as u32;
        self.items.push(RoutineItem {
            id: 0,
            routine_id: self.id,
            rest_time,
            order_index,
            kind: RoutineItemKind::Exercise(exercise),
        });
        self
    }

    /// Append a superset item.
    pub fn with_superset(mut self, superset: SuperSet) -> Self {
        let order_index = self.items.len() as u32;
        self.items.push(RoutineItem {
            id: 0,
            routine_id: self.id,
            rest_time: superset.rest_time,
            order_index,
            kind: RoutineItemKind::SuperSet(superset),
        });
        self
    }

    /// Sort items and their sets by `order_index`.
    pub fn normalize_order(&mut self) {
        self.items.sort_by_key(|item| item.order_index);
        for item in &mut self.items {
            match &mut item.kind {
                RoutineItemKind::Exercise(exercise) => exercise.normalize_order(),
                RoutineItemKind::SuperSet(superset) => {
                    superset.primary_exercise.normalize_order();
                    superset.secondary_exercise.normalize_order();
                }
            }
        }
    }

    /// Number of single-exercise items.
    pub fn exercise_count(&self) -> usize {
        self.items.iter().filter(|item| item.exercise().is_some()).count()
    }
}

/// One entry of a routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineItem {
    /// Backend identifier
    #[serde(default)]
    pub id: EntityId,

    /// Owning routine
    #[serde(default)]
    pub routine_id: EntityId,

    /// Rest after this item, in seconds
    #[serde(default)]
    pub rest_time: u32,

    /// Position in the routine
    #[serde(default)]
    pub order_index: u32,

    /// What this item runs
    #[serde(flatten)]
    pub kind: RoutineItemKind,
}

impl RoutineItem {
    /// The exercise, when this item runs a single exercise.
    pub fn exercise(&self) -> Option<&Exercise> {
        match &self.kind {
            RoutineItemKind::Exercise(exercise) => Some(exercise),
            RoutineItemKind::SuperSet(_) => None,
        }
    }
}

/// Either a single exercise or a superset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineItemKind {
    /// A single exercise
    Exercise(Exercise),
    /// Two exercises sharing one rest time
    SuperSet(SuperSet),
}

/// A catalog exercise with its planned sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Backend identifier
    pub id: EntityId,

    /// Exercise name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Planned sets
    #[serde(default)]
    pub sets: Vec<PlannedSet>,
}

impl Exercise {
    /// Create an exercise without sets.
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            sets: Vec::new(),
        }
    }

    /// Append a planned set.
    pub fn with_set(mut self, reps: u32, weight: f64, duration: u32) -> Self {
        let order_index = self.sets.len() as u32;
        self.sets.push(PlannedSet {
            id: 0,
            exercise_id: self.id,
            reps,
            weight,
            duration,
            order_index,
        });
        self
    }

    fn normalize_order(&mut self) {
        self.sets.sort_by_key(|set| set.order_index);
    }
}

/// A planned set of an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSet {
    /// Backend identifier
    #[serde(default)]
    pub id: EntityId,

    /// Owning exercise
    #[serde(default)]
    pub exercise_id: EntityId,

    /// Planned repetitions
    #[serde(default)]
    pub reps: u32,

    /// Planned weight in kg
    #[serde(default)]
    pub weight: f64,

    /// Planned duration in seconds; zero for rep-based sets
    #[serde(default)]
    pub duration: u32,

    /// Position within the exercise
    #[serde(default)]
    pub order_index: u32,
}

impl PlannedSet {
    /// Whether this set is timed rather than rep-based.
    pub fn is_timed(&self) -> bool {
        self.duration > 0
    }
}

/// Two exercises performed back to back with a single rest time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperSet {
    /// Backend identifier
    pub id: EntityId,

    /// Superset name
    #[serde(default)]
    pub name: String,

    /// First exercise
    pub primary_exercise: Exercise,

    /// Second exercise
    pub secondary_exercise: Exercise,

    /// Rest after the pair, in seconds
    #[serde(default)]
    pub rest_time: u32,
}
