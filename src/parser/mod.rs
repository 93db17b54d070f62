//! Maps a rendered workout page into a [`Workout`].
//!
//! Nothing here fails: a page missing the expected elements yields blank
//! fields, the same way a page of a session that failed to log in does.

pub mod date;
pub mod exercise_list;

use scraper::Html;

use crate::schema::{Workout, WorkoutId};

#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    pub include_notes: bool,
}

pub fn parse_workout(html: &Html, id: WorkoutId, options: ParseOptions) -> Workout {
    Workout::builder()
        .id(id)
        .date(date::parse(html))
        .exercises(exercise_list::parse(html, options.include_notes))
        .build()
}

/// Splits a multi-line text block into its lines, keeping empty lines.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::{parse_workout, split_lines, ParseOptions};

    #[test]
    fn instructions_are_split_on_newline() {
        assert_eq!(
            split_lines("Do 3 sets\nRest 1 min"),
            vec!["Do 3 sets".to_owned(), "Rest 1 min".to_owned()]
        );
    }

    #[test]
    fn whole_page() {
        let html = Html::parse_document(
            r#"<html><body>
            <h2> Tuesday, March 5, 2024 </h2>
            <div class="print-cell">
              <div class="split-left"><h4>Back Squat</h4><p>5x5 @ 80%
Rest 2 min</p></div>
            </div>
            </body></html>"#,
        );
        let workout = parse_workout(&html, "42".to_owned().into(), ParseOptions::default());
        assert_eq!(workout.id().as_ref(), "42");
        assert_eq!(workout.date().as_ref(), "Tuesday, March 5, 2024");
        assert_eq!(workout.exercises().len(), 1);
        assert_eq!(workout.exercises()[0].name().as_ref(), "Back Squat");
        assert_eq!(
            workout.exercises()[0].instructions(),
            &vec!["5x5 @ 80%".to_owned(), "Rest 2 min".to_owned()]
        );
    }
}
