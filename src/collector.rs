//! Drives the visit → extract → aggregate loop.

use std::{collections::BTreeMap, sync::Arc};

use anyhow::Context;
use itertools::Itertools;
use log::{debug, info, warn};
use scraper::Html;
use tokio::{
    sync::{mpsc, Mutex},
    task::JoinSet,
};
use url::Url;

use crate::{
    aggregator::{Aggregator, WorkoutCollection},
    parser::{parse_workout, ParseOptions},
    schema::Workout,
    workout_id::{workout_id, IdPosition},
};

/// Something that can render a workout page.
pub trait PageSource {
    /// Loads `url` and returns the rendered document as HTML.
    fn load(&self, url: &Url) -> anyhow::Result<String>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CollectOptions {
    pub id_position: IdPosition,
    pub parse: ParseOptions,
}

pub fn scrape<S: PageSource + ?Sized>(
    source: &S,
    url: &Url,
    options: CollectOptions,
) -> anyhow::Result<Workout> {
    let html = source
        .load(url)
        .with_context(|| format!("While loading {url}"))?;
    let id = workout_id(url.as_str(), options.id_position);
    Ok(parse_workout(&Html::parse_document(&html), id, options.parse))
}

/// Drops the URLs whose workout is already in `collection`.
pub fn skip_collected(
    urls: Vec<Url>,
    collection: &WorkoutCollection,
    id_position: IdPosition,
) -> Vec<Url> {
    let (skipped, remaining): (Vec<_>, Vec<_>) = urls
        .into_iter()
        .partition(|url| collection.contains(&workout_id(url.as_str(), id_position)));
    if !skipped.is_empty() {
        info!("Skipping {} already collected workouts.", skipped.len());
        debug!("Skipped: {}", skipped.iter().join(", "));
    }
    remaining
}

pub fn collect_sequentially<S: PageSource + ?Sized>(
    source: &S,
    urls: &[Url],
    aggregator: &mut Aggregator,
    options: CollectOptions,
) -> anyhow::Result<()> {
    for (i, url) in urls.iter().enumerate() {
        info!("[{}/{}] Visiting {url}", i + 1, urls.len());
        let workout = match scrape(source, url, options) {
            Ok(workout) => workout,
            Err(e) => return Err(save_before_bailing(aggregator, e)),
        };
        aggregator.record(workout)?;
    }
    Ok(())
}

/// Visits `urls` with one blocking worker per source.
///
/// Workouts reach the aggregator in the order of `urls`, whatever order
/// the workers finish in.  The first failure stops handing out work; the
/// visits already under way are awaited, and every workout that completed
/// is recorded in URL order (skipping the failed ones) before the error is
/// returned.
pub async fn collect_in_parallel<S>(
    sources: Vec<S>,
    urls: Vec<Url>,
    aggregator: &mut Aggregator,
    options: CollectOptions,
) -> anyhow::Result<()>
where
    S: PageSource + Send + 'static,
{
    let total = urls.len();
    let queue = Arc::new(Mutex::new(urls.into_iter().enumerate()));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut workers = JoinSet::new();
    for (worker, source) in sources.into_iter().enumerate() {
        let queue = Arc::clone(&queue);
        let tx = tx.clone();
        workers.spawn_blocking(move || loop {
            let Some((index, url)) = queue.blocking_lock().next() else {
                break;
            };
            info!("[{}/{total}] Worker {worker} visiting {url}", index + 1);
            let res = scrape(&source, &url, options);
            if tx.send((index, res)).is_err() {
                break;
            }
        });
    }
    drop(tx);

    let mut pending = BTreeMap::new();
    let mut next = 0;
    let mut failure = None;
    while let Some((index, res)) = rx.recv().await {
        match res {
            Ok(workout) => {
                pending.insert(index, workout);
            }
            Err(e) if failure.is_none() => {
                let undispatched = queue.lock().await.by_ref().count();
                if undispatched > 0 {
                    info!("Not visiting the remaining {undispatched} workouts.");
                }
                failure = Some((index, e));
            }
            Err(e) => warn!("#{} also failed: {e:#}", index + 1),
        }
        while let Some(workout) = pending.remove(&next) {
            aggregator.record(workout)?;
            next += 1;
        }
    }
    while let Some(res) = workers.join_next().await {
        res.context("A scraping worker panicked")?;
    }

    let Some((failed, error)) = failure else {
        return Ok(());
    };
    if !pending.is_empty() {
        info!(
            "Keeping {} workouts that finished after #{} failed.",
            pending.len(),
            failed + 1
        );
    }
    for workout in pending.into_values() {
        aggregator.record(workout)?;
    }
    Err(save_before_bailing(aggregator, error))
}

fn save_before_bailing(aggregator: &mut Aggregator, error: anyhow::Error) -> anyhow::Error {
    match aggregator.save() {
        Ok(()) => info!(
            "Saved {} workouts before stopping.",
            aggregator.collection().len()
        ),
        Err(save_error) => warn!("Could not save progress: {save_error:#}"),
    }
    error
}
