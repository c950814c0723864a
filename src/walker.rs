use std::io::Write;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use tracing::{info, warn};

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::parser;
use crate::render::ChangelogWriter;

pub const DEFAULT_START_URL: &str = "https://github.com/VSCodeVim/Vim/releases";

enum WalkState {
    Fetching(Url),
    Done,
}

/// Walk totals returned after completion.
#[derive(Debug, Default)]
pub struct WalkStats {
    pub pages: usize,
    pub releases: usize,
}

/// Spinner showing the page currently being fetched.
pub fn page_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] page {pos}: {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb
}

/// Follow next-page links from `start`, writing each page's releases as it is parsed.
///
/// Stops when a page has no next page, or once `max_pages` pages were read
/// (`Some(0)` fetches nothing). Any fetch failure ends the walk with an error;
/// releases already written stay in `out`. `pb` is cleared on every exit.
pub async fn walk<W: Write>(
    fetcher: &Fetcher,
    start: Url,
    out: &mut ChangelogWriter<W>,
    max_pages: Option<usize>,
    pb: &ProgressBar,
) -> Result<WalkStats> {
    let result = follow_pages(fetcher, start, out, max_pages, pb).await;
    pb.finish_and_clear();
    result
}

/// Walk, then flush `out`. A walk error wins over a flush error.
pub async fn walk_into<W: Write>(
    fetcher: &Fetcher,
    start: Url,
    mut out: ChangelogWriter<W>,
    max_pages: Option<usize>,
    pb: &ProgressBar,
) -> Result<(WalkStats, W)> {
    let walked = walk(fetcher, start, &mut out, max_pages, pb).await;
    let finished = out.finish();
    let stats = walked?;
    Ok((stats, finished?))
}

async fn follow_pages<W: Write>(
    fetcher: &Fetcher,
    start: Url,
    out: &mut ChangelogWriter<W>,
    max_pages: Option<usize>,
    pb: &ProgressBar,
) -> Result<WalkStats> {
    let mut stats = WalkStats::default();
    let mut state = if max_pages == Some(0) {
        warn!("Page limit is 0, not fetching {}", start);
        WalkState::Done
    } else {
        WalkState::Fetching(start)
    };

    while let WalkState::Fetching(url) = state {
        pb.set_message(url.to_string());
        let html = fetcher.fetch_page(&url).await?;
        let page = parser::parse_page(&html, &url)?;

        for release in &page.releases {
            out.write_release(release)?;
        }
        stats.pages += 1;
        stats.releases += page.releases.len();
        pb.inc(1);
        info!("Page {}: {} releases from {}", stats.pages, page.releases.len(), url);

        state = match page.next {
            Some(next) if max_pages.is_some_and(|max| stats.pages >= max) => {
                warn!("Page limit reached, not following {}", next);
                WalkState::Done
            }
            Some(next) => {
                info!("Next page: {}", next);
                WalkState::Fetching(next)
            }
            None => WalkState::Done,
        };
    }

    info!("Walked {} pages ({} releases)", stats.pages, stats.releases);
    Ok(stats)
}
