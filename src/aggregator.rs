//! In-memory workout collection with periodic checkpoints to disk.

use std::{fmt::Debug, num::NonZeroUsize, path::PathBuf};

use anyhow::bail;
use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use truecoach_scraping_utils::fs_json_util::{read_json_or_default, write_json};

use crate::schema::{Workout, WorkoutId};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputShape {
    /// A JSON array in visiting order; the same id may appear twice.
    List,
    /// A JSON object keyed by workout id; a later visit replaces an earlier one.
    #[default]
    Map,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkoutCollection {
    List(Vec<Workout>),
    Map(IndexMap<WorkoutId, Workout>),
}

impl WorkoutCollection {
    pub fn new(shape: OutputShape) -> Self {
        match shape {
            OutputShape::List => Self::List(vec![]),
            OutputShape::Map => Self::Map(IndexMap::new()),
        }
    }

    /// Loads a previously written output file, or starts empty if there is none.
    pub fn load_or_create<P: Into<PathBuf> + Debug>(
        path: P,
        shape: OutputShape,
    ) -> anyhow::Result<Self> {
        let path = path.into();
        let Some(collection) = read_json_or_default::<_, Option<Self>>(&path)? else {
            info!("{path:?} was not found.  Starting from an empty collection.");
            return Ok(Self::new(shape));
        };
        if collection.shape() != shape {
            bail!(
                "{path:?} holds a {:?} collection, but {shape:?} was requested",
                collection.shape()
            );
        }
        info!("Loaded {} workouts from {path:?}.", collection.len());
        Ok(collection)
    }

    pub fn shape(&self) -> OutputShape {
        match self {
            Self::List(_) => OutputShape::List,
            Self::Map(_) => OutputShape::Map,
        }
    }

    pub fn insert(&mut self, workout: Workout) {
        match self {
            Self::List(workouts) => workouts.push(workout),
            Self::Map(workouts) => {
                if let Some(replaced) = workouts.insert(workout.id().clone(), workout) {
                    warn!("Workout {} was visited twice; keeping the later one.", replaced.id());
                }
            }
        }
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        match self {
            Self::List(workouts) => workouts.iter().any(|w| w.id() == id),
            Self::Map(workouts) => workouts.contains_key(id),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::List(workouts) => workouts.len(),
            Self::Map(workouts) => workouts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owns the collection for the duration of a run and writes it out every
/// `checkpoint_interval` visits.
pub struct Aggregator {
    collection: WorkoutCollection,
    output_path: PathBuf,
    checkpoint_interval: NonZeroUsize,
    visited: usize,
    saved_at: Option<usize>,
}

impl Aggregator {
    pub fn new(
        collection: WorkoutCollection,
        output_path: impl Into<PathBuf>,
        checkpoint_interval: NonZeroUsize,
    ) -> Self {
        Self {
            collection,
            output_path: output_path.into(),
            checkpoint_interval,
            visited: 0,
            saved_at: None,
        }
    }

    pub fn record(&mut self, workout: Workout) -> anyhow::Result<()> {
        self.collection.insert(workout);
        self.visited += 1;
        if self.visited % self.checkpoint_interval.get() == 0 {
            self.save()?;
        }
        Ok(())
    }

    /// Overwrites the output file with the whole collection.
    pub fn save(&mut self) -> anyhow::Result<()> {
        write_json(&self.output_path, &self.collection)?;
        self.saved_at = Some(self.visited);
        info!(
            "Data written to {:?} ({} workouts).",
            self.output_path,
            self.collection.len()
        );
        Ok(())
    }

    /// Final save, skipped when the last visit already triggered a checkpoint.
    pub fn finish(mut self) -> anyhow::Result<WorkoutCollection> {
        if self.saved_at != Some(self.visited) {
            self.save()?;
        }
        Ok(self.collection)
    }

    pub fn collection(&self) -> &WorkoutCollection {
        &self.collection
    }

    pub fn visited(&self) -> usize {
        self.visited
    }
}
