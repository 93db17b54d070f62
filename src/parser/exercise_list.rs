use scraper::{ElementRef, Html};
use truecoach_scraping_utils::selector;

use super::split_lines;
use crate::schema::Exercise;

pub const CONTAINER: &str = ".print-cell";
pub const ITEM: &str = ".split-left";

/// Exercises of the first workout container, in document order.
///
/// A page without the container has no exercises.
pub fn parse(html: &Html, include_notes: bool) -> Vec<Exercise> {
    let Some(container) = html.select(selector!(CONTAINER)).next() else {
        return vec![];
    };
    container
        .select(selector!(ITEM))
        .map(|item| parse_item(item, include_notes))
        .collect()
}

pub fn parse_item(item: ElementRef, include_notes: bool) -> Exercise {
    let name = first_text(item, selector!("h4"))
        .map(|name| name.trim().to_owned())
        .unwrap_or_default()
        .into();
    let instructions = first_text(item, selector!("p"))
        .map(|text| split_lines(&text))
        .unwrap_or_default();
    let notes = include_notes
        .then(|| first_text(item, selector!("textarea")))
        .flatten()
        .filter(|text| !text.trim().is_empty())
        .map(|text| split_lines(&text));
    Exercise::builder()
        .name(name)
        .instructions(instructions)
        .notes(notes)
        .build()
}

fn first_text(element: ElementRef, selector: &scraper::Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>())
}
