use serde::Deserialize;

use crate::schema::WorkoutId;

/// Which `/`-separated segment of a workout URL carries its id.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IdPosition {
    /// `…/workouts/<id>`
    Last,
    /// `…/workouts/<id>/edit`
    #[default]
    BeforeLast,
}

impl IdPosition {
    fn offset_from_end(self) -> usize {
        match self {
            Self::Last => 0,
            Self::BeforeLast => 1,
        }
    }
}

/// Splits `url` on `/` and picks the segment at `position`.
///
/// The shape of the URL is not checked: a URL with too few segments
/// yields an empty id.
pub fn workout_id(url: &str, position: IdPosition) -> WorkoutId {
    url.rsplit('/')
        .nth(position.offset_from_end())
        .unwrap_or_default()
        .to_owned()
        .into()
}

#[cfg(test)]
mod tests {
    use super::{workout_id, IdPosition};

    #[test]
    fn before_last_segment_of_edit_url() {
        let id = workout_id(
            "https://app.truecoach.co/client/workouts/380805519/edit",
            IdPosition::BeforeLast,
        );
        assert_eq!(id.as_ref(), "380805519");
    }

    #[test]
    fn last_segment_of_plain_url() {
        let id = workout_id(
            "https://app.truecoach.co/client/workouts/380805519",
            IdPosition::Last,
        );
        assert_eq!(id.as_ref(), "380805519");
    }

    #[test]
    fn trailing_slash_gives_empty_last_segment() {
        let id = workout_id("https://app.truecoach.co/client/workouts/", IdPosition::Last);
        assert_eq!(id.as_ref(), "");
    }

    #[test]
    fn too_few_segments_gives_empty_id() {
        assert_eq!(workout_id("380805519", IdPosition::BeforeLast).as_ref(), "");
    }
}
