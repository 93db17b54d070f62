use log::warn;
use scraper::Html;
use truecoach_scraping_utils::selector;

use crate::schema::WorkoutDate;

pub const HEADER: &str = "h2";

/// Text of the first date header, or an empty date if the page has none.
pub fn parse(html: &Html) -> WorkoutDate {
    match html.select(selector!(HEADER)).next() {
        Some(header) => header.text().collect::<String>().trim().to_owned().into(),
        None => {
            warn!("Date header `{HEADER}` not found");
            String::new().into()
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::parse;

    #[test]
    fn first_header_wins() {
        let html = Html::parse_document("<h2>Mon, Jan 1</h2><h2>Other</h2>");
        assert_eq!(parse(&html).as_ref(), "Mon, Jan 1");
    }

    #[test]
    fn missing_header_is_empty() {
        let html = Html::parse_document("<h1>Login</h1>");
        assert_eq!(parse(&html).as_ref(), "");
    }
}
