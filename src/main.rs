use std::path::PathBuf;

use clap::Parser;
use log::info;
use truecoach_scraping::{
    aggregator::{Aggregator, WorkoutCollection},
    browser::{self, BrowserOptions, BrowserTab},
    collector::{collect_in_parallel, collect_sequentially, skip_collected, CollectOptions},
    config::Config,
    url_list,
};
use truecoach_scraping_utils::{
    credentials::Credentials,
    fs_json_util::{read_json, read_toml},
};

#[derive(Parser)]
struct Opts {
    config_toml: PathBuf,
    /// Only visit the first N URLs of the list.
    #[arg(long)]
    limit: Option<usize>,
    /// Keep the existing output file and skip workouts already in it.
    #[arg(long)]
    resume: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    let config: Config = read_toml(&opts.config_toml)?;
    let credentials: Credentials = match &config.credentials_path {
        Some(path) => read_json(path)?,
        None => Credentials::from_env()?,
    };
    run(&opts, &config, &credentials).await
}

async fn run(opts: &Opts, config: &Config, credentials: &Credentials) -> anyhow::Result<()> {
    let options = CollectOptions {
        id_position: config.id_position,
        parse: config.parse_options(),
    };

    let mut urls = url_list::load(&config.urls_path)?;
    if let Some(limit) = opts.limit {
        urls.truncate(limit);
    }
    let collection = if opts.resume {
        let collection = WorkoutCollection::load_or_create(&config.output_path, config.shape)?;
        urls = skip_collected(urls, &collection, config.id_position);
        collection
    } else {
        WorkoutCollection::new(config.shape)
    };
    info!("{} workouts to visit.", urls.len());

    let browser = browser::launch(&BrowserOptions {
        headless: config.headless,
        port: config.remote_debugging_port,
    })?;
    let first_tab = BrowserTab::open(&browser, config.network_idle)?;
    first_tab.login(&config.login_url, credentials)?;

    let mut aggregator = Aggregator::new(
        collection,
        &config.output_path,
        config.checkpoint_interval,
    );
    let tabs = config.tabs.get().min(urls.len().max(1));
    if tabs == 1 {
        collect_sequentially(&first_tab, &urls, &mut aggregator, options)?;
    } else {
        // Extra tabs share the session cookie of the first one.
        let mut sources = vec![first_tab];
        for _ in 1..tabs {
            sources.push(BrowserTab::open(&browser, config.network_idle)?);
        }
        info!("Scraping with {tabs} tabs.");
        collect_in_parallel(sources, urls, &mut aggregator, options).await?;
    }

    let collection = aggregator.finish()?;
    info!(
        "Successfully saved {} workouts to {:?}.",
        collection.len(),
        config.output_path
    );
    Ok(())
}
