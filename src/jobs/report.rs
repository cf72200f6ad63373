//! Job tree report with optional terminal colors

use crate::jobs::source::JobSource;
use crate::jobs::tree::{LineStyle, RenderLine, TreeWalker};
use anyhow::{Context, Result};
use clap::ValueEnum;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Deserialize;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// One line of output; the prefix is never colored
pub fn format_line(line: &RenderLine, colored: bool) -> String {
    if !colored {
        return line.plain_text();
    }

    let text = match line.style {
        LineStyle::Disabled => line.text.bright_red().to_string(),
        LineStyle::Service => line.text.bright_blue().to_string(),
        LineStyle::Highlighted => line.text.green().to_string(),
        LineStyle::Plain => line.text.clone(),
    };
    format!("{}{}", line.prefix, text)
}

pub fn format_tree(lines: &[RenderLine], colored: bool) -> String {
    lines
        .iter()
        .map(|line| format_line(line, colored))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct JobTreeReport<'a, S: ?Sized> {
    source: &'a S,
    walker: TreeWalker,
    max_depth: Option<usize>,
}

impl<'a, S> JobTreeReport<'a, S>
where
    S: JobSource + ?Sized,
{
    pub fn new(source: &'a S, walker: TreeWalker, max_depth: Option<usize>) -> Self {
        Self {
            source,
            walker,
            max_depth,
        }
    }

    /// Fetch the listing and write the tree to `out`, returning the line count
    pub async fn write_to<W: Write>(&self, out: &mut W, colored: bool) -> Result<usize> {
        let jobs = self
            .source
            .list_all_jobs(self.max_depth)
            .await
            .context("Failed to list jobs")?;

        let lines = self.walker.render(&jobs);
        if !lines.is_empty() {
            writeln!(out, "{}", format_tree(&lines, colored))?;
        }
        out.flush()?;

        info!("Rendered {} of {} listed jobs", lines.len(), jobs.len());
        Ok(lines.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::source::SnapshotJobSource;

    fn line(text: &str, style: LineStyle) -> RenderLine {
        RenderLine {
            prefix: "├── ".to_string(),
            text: text.to_string(),
            is_last: false,
            style,
        }
    }

    #[test]
    fn test_uncolored_line_is_plain_text() {
        let l = line("build *JOB DISABLED*", LineStyle::Disabled);
        assert_eq!(format_line(&l, false), "├── build *JOB DISABLED*");
    }

    #[test]
    fn test_colored_line_keeps_prefix_plain() {
        let l = line("api", LineStyle::Service);
        let colored = format_line(&l, true);
        assert!(colored.starts_with("├── \u{1b}["));
        assert!(colored.contains("api"));
        assert!(colored.ends_with("\u{1b}[39m"));
    }

    #[test]
    fn test_plain_style_is_never_colored() {
        let l = line("misc", LineStyle::Plain);
        assert_eq!(format_line(&l, true), "├── misc");
    }

    #[test]
    fn test_color_mode_overrides() {
        assert!(ColorMode::Always.enabled());
        assert!(!ColorMode::Never.enabled());
    }

    #[tokio::test]
    async fn test_report_writes_tree() {
        let source = SnapshotJobSource::from_json(
            r#"{"jobs": [
                {"name": "web", "jobs": [{"name": "test"}, {"name": "old", "color": "disabled"}]},
                {"name": "tools"}
            ]}"#,
        )
        .unwrap();
        let report = JobTreeReport::new(&source, TreeWalker::default(), None);

        let mut out = Vec::new();
        let count = report.write_to(&mut out, false).await.unwrap();

        assert_eq!(count, 4);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "├── web\n│   ├── test\n│   └── old *JOB DISABLED*\n└── tools\n"
        );
    }
}
