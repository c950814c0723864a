use std::sync::LazyLock;

use reqwest::Url;
use scraper::{Html, Selector};

use super::blocks;
use crate::error::{ChangelogError, Result};

static PAGINATION_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.paginate-container > div > a").unwrap());

/// Label of the last pagination link on the final page.
const PREVIOUS_ONLY: &str = "Previous";

/// Resolve the next listing page from the pagination control's last link.
///
/// `None` when there are no pagination links, when the last one only leads
/// back, or when it carries no `href`.
pub fn find_next_page(document: &Html, current: &Url) -> Result<Option<Url>> {
    let Some(last) = document.select(&PAGINATION_LINK).last() else {
        return Ok(None);
    };
    if blocks::flatten_inline(last) == PREVIOUS_ONLY {
        return Ok(None);
    }
    let Some(href) = last.value().attr("href") else {
        return Ok(None);
    };

    current
        .join(href)
        .map(Some)
        .map_err(|e| ChangelogError::UrlParse(format!("{}: {}", href, e)))
}
