pub mod blocks;
pub mod pagination;
pub mod release;

use reqwest::Url;
use scraper::Html;

use crate::error::Result;
use release::Release;

/// One listing page reduced to its releases and the page that follows it.
pub struct Page {
    pub releases: Vec<Release>,
    pub next: Option<Url>,
}

/// Parse a fetched listing page: releases in page order, then the next-page link.
pub fn parse_page(html: &str, url: &Url) -> Result<Page> {
    let document = Html::parse_document(html);
    let releases = release::parse_releases(&document, url)?;
    let next = pagination::find_next_page(&document, url)?;
    Ok(Page { releases, next })
}
