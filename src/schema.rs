use derive_more::{AsRef, Display, From};
use getset::Getters;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// The short id of a workout, taken from its URL.
#[derive(
    Clone, PartialEq, Eq, Hash, Debug, From, AsRef, Display, Serialize, Deserialize,
)]
pub struct WorkoutId(String);

#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
pub struct WorkoutDate(String);

#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
pub struct ExerciseName(String);

#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct Workout {
    id: WorkoutId,
    date: WorkoutDate,
    exercises: Vec<Exercise>,
}

#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct Exercise {
    name: ExerciseName,
    instructions: Vec<String>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::{Exercise, Workout};

    #[test]
    fn notes_are_omitted_when_absent() {
        let workout = Workout::builder()
            .id("380805519".to_owned().into())
            .date("Monday, Jan 2".to_owned().into())
            .exercises(vec![
                Exercise::builder()
                    .name("Squat".to_owned().into())
                    .instructions(vec!["5x5".to_owned()])
                    .build(),
                Exercise::builder()
                    .name("Bench".to_owned().into())
                    .instructions(vec![])
                    .notes(Some(vec!["felt heavy".to_owned()]))
                    .build(),
            ])
            .build();
        assert_eq!(
            serde_json::to_string(&workout).unwrap(),
            r#"{"id":"380805519","date":"Monday, Jan 2","exercises":[{"name":"Squat","instructions":["5x5"]},{"name":"Bench","instructions":[],"notes":["felt heavy"]}]}"#
        );
    }
}
