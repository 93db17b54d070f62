use std::path::Path;

use anyhow::Context;
use truecoach_scraping_utils::fs_json_util::read_json;
use url::Url;

/// Loads the workout URLs to visit.
///
/// A `.json` file holds an array of strings.  Anything else is read as
/// one URL per line, where blank lines and `#` comments are skipped.
pub fn load(path: &Path) -> anyhow::Result<Vec<Url>> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let urls: Vec<String> = read_json(path)?;
        urls.iter()
            .map(|url| {
                Url::parse(url).with_context(|| format!("Invalid URL {url:?} in {path:?}"))
            })
            .collect()
    } else {
        let text = fs_err::read_to_string(path)?;
        parse_lines(&text).with_context(|| format!("While reading {path:?}"))
    }
}

pub fn parse_lines(text: &str) -> anyhow::Result<Vec<Url>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            Url::parse(line).with_context(|| format!("Invalid URL {line:?} on line {line_no}"))
        })
        .collect()
}
