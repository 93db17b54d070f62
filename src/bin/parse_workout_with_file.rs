use std::path::PathBuf;

use clap::Parser;
use scraper::Html;
use truecoach_scraping::{
    parser::{parse_workout, ParseOptions},
    schema::WorkoutId,
    workout_id::{workout_id, IdPosition},
};

/// Runs the extractor on a saved workout page and prints the result.
#[derive(Parser)]
struct Opts {
    input: PathBuf,
    /// Workout URL the page was saved from; its id is put into the output.
    #[arg(long)]
    url: Option<String>,
    #[arg(long, value_enum, default_value_t = IdPosition::BeforeLast)]
    id_position: IdPosition,
    #[arg(long)]
    notes: bool,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let html = Html::parse_document(&fs_err::read_to_string(&opts.input)?);
    let id = opts
        .url
        .as_deref()
        .map_or_else(
            || WorkoutId::from(String::new()),
            |url| workout_id(url, opts.id_position),
        );
    let workout = parse_workout(
        &html,
        id,
        ParseOptions {
            include_notes: opts.notes,
        },
    );
    println!("{}", serde_json::to_string_pretty(&workout)?);
    Ok(())
}
