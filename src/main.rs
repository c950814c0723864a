mod error;
mod fetch;
mod parser;
mod render;
mod walker;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use reqwest::Url;

use render::OutputFormat;

#[derive(Parser)]
#[command(name = "release_notes", about = "Build a changelog from a paginated releases page")]
struct Cli {
    /// Releases listing page to start from
    #[arg(long, env = "RELEASE_NOTES_URL", default_value = walker::DEFAULT_START_URL)]
    url: String,
    /// Changelog file to write (overwritten on each run)
    #[arg(short, long, default_value = "CHANGELOG.md")]
    output: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,
    /// Stop after this many pages (default: follow every next page)
    #[arg(short = 'n', long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    max_pages: Option<usize>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let start = Url::parse(&cli.url).with_context(|| format!("Invalid start URL: {}", cli.url))?;
    let fetcher = fetch::Fetcher::new().context("Failed to build HTTP client")?;
    let writer = render::create_output(&cli.output, cli.format)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;

    let pb = walker::page_spinner();
    let (stats, _) = walker::walk_into(&fetcher, start, writer, cli.max_pages, &pb).await?;

    println!(
        "Wrote {} releases from {} pages to {}",
        stats.releases,
        stats.pages,
        cli.output.display()
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
