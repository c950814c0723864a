use std::sync::LazyLock;

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::debug;

use super::blocks::{self, MarkupNode};
use crate::error::{ChangelogError, Result};

static RELEASE_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.release-timeline > div").unwrap());
static TITLE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.release-body div.release-header > h1 > a").unwrap());
static TAG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.release-meta > ul > li > a > span").unwrap());
static DATE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.release-header > p > relative-time").unwrap());
static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.release-body > div.markdown-body").unwrap());
static BODY_NODES: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p, h2, li").unwrap());

#[derive(Debug, Clone, Serialize)]
pub struct Release {
    pub tag: String,
    pub title: String,
    pub url: String,
    /// Display text as shown on the page, not parsed.
    pub date: String,
    pub body: Vec<MarkupNode>,
}

/// Extract every release block on a listing page, in page order.
///
/// Blocks without a body are dropped. `page_url` is used to resolve the
/// relative release links.
pub fn parse_releases(document: &Html, page_url: &Url) -> Result<Vec<Release>> {
    let mut releases = Vec::new();
    let mut skipped = 0usize;

    for block in document.select(&RELEASE_BLOCK) {
        match extract(block, page_url)? {
            Some(release) => releases.push(release),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} release blocks without a body on {}", skipped, page_url);
    }
    Ok(releases)
}

/// `None` when the block has no `markdown-body`, or one with no text at all
/// (an image-only body counts as body-less).
fn extract(block: ElementRef<'_>, page_url: &Url) -> Result<Option<Release>> {
    let Some(body) = block
        .select(&BODY)
        .next()
        .filter(|b| b.text().any(|t| !t.trim().is_empty()))
    else {
        return Ok(None);
    };

    let link = block
        .select(&TITLE_LINK)
        .next()
        .ok_or(ChangelogError::MissingField("title link"))?;
    let href = link
        .value()
        .attr("href")
        .ok_or(ChangelogError::MissingField("release href"))?;
    let url = page_url
        .join(href)
        .map_err(|e| ChangelogError::UrlParse(format!("{}: {}", href, e)))?;

    let tag = block
        .select(&TAG)
        .next()
        .map(blocks::flatten_inline)
        .ok_or(ChangelogError::MissingField("tag"))?;

    let date = block
        .select(&DATE)
        .next()
        .map(|el| {
            let text = blocks::flatten_inline(el);
            if text.is_empty() {
                el.value().attr("datetime").unwrap_or_default().to_string()
            } else {
                text
            }
        })
        .ok_or(ChangelogError::MissingField("date"))?;

    Ok(Some(Release {
        tag,
        title: blocks::flatten_inline(link),
        url: url.to_string(),
        date,
        body: body_nodes(body),
    }))
}

/// Body nodes in document order. A paragraph or heading inside a list item
/// belongs to that item's text.
fn body_nodes(body: ElementRef<'_>) -> Vec<MarkupNode> {
    body.select(&BODY_NODES)
        .filter(|el| el.value().name() == "li" || !inside_list_item(*el, body))
        .filter_map(blocks::classify)
        .collect()
}

fn inside_list_item(el: ElementRef<'_>, body: ElementRef<'_>) -> bool {
    el.ancestors()
        .take_while(|node| node.id() != body.id())
        .filter_map(ElementRef::wrap)
        .any(|a| a.value().name() == "li")
}
