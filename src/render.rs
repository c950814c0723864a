use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::error::Result;
use crate::parser::blocks::MarkupNode;
use crate::parser::release::Release;

/// Marker in front of every release header line.
pub const RELEASE_MARKER: &str = "#";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Changelog lines
    Markdown,
    /// One JSON object per release per line
    Json,
}

/// Changelog lines for one release: header, then one block per body node.
pub fn render(release: &Release) -> Vec<String> {
    let mut lines = Vec::with_capacity(release.body.len() * 2 + 1);
    lines.push(format!(
        "{} [{} {}]({}) ({})",
        RELEASE_MARKER, release.tag, release.title, release.url, release.date
    ));

    for node in &release.body {
        match node {
            MarkupNode::Paragraph(text) => {
                lines.push(String::new());
                lines.push(text.clone());
            }
            MarkupNode::Heading(text) => lines.push(format!("## {}", text)),
            MarkupNode::ListItem(text) => lines.push(format!("* {}", text)),
        }
    }

    lines
}

/// Append-only changelog sink. Releases are written in the order received.
pub struct ChangelogWriter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> ChangelogWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn write_release(&mut self, release: &Release) -> Result<()> {
        match self.format {
            OutputFormat::Markdown => {
                for line in render(release) {
                    writeln!(self.out, "{}", line)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, release)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Create (or truncate) the changelog file.
pub fn create_output(path: &Path, format: OutputFormat) -> Result<ChangelogWriter<BufWriter<File>>> {
    let file = File::create(path)?;
    Ok(ChangelogWriter::new(BufWriter::new(file), format))
}
