//! Output rendering for the CLI

use console::Style;
use p8kitlib::{Comparison, SplitOutput, TokenReport};
use serde::Serialize;
use std::path::Path;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn from_arg(value: Option<&str>) -> Self {
        match value {
            Some("json") => OutputMode::Json,
            _ => OutputMode::Text,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}

/// Render a token report. The remaining-budget line turns red when over.
pub fn render_report(report: &TokenReport, mode: OutputMode) -> anyhow::Result<String> {
    if mode == OutputMode::Json {
        return to_json(report);
    }

    let text = report.render_text();
    if report.footer.remaining >= 0 {
        return Ok(text);
    }

    let alert = Style::new().red().bold();
    Ok(text
        .lines()
        .map(|line| {
            if line.starts_with("Tokens remaining:") {
                format!("{}\n", alert.apply_to(line))
            } else {
                format!("{line}\n")
            }
        })
        .collect())
}

/// Render the files written by a split, one per line.
pub fn render_split(output: &SplitOutput, mode: OutputMode) -> anyhow::Result<String> {
    if mode == OutputMode::Json {
        return to_json(output);
    }

    Ok(output
        .files
        .iter()
        .map(|f| format!("Creating file: {}\n", f.display()))
        .collect())
}

pub fn render_join(output: &Path, mode: OutputMode) -> anyhow::Result<String> {
    if mode == OutputMode::Json {
        return to_json(&serde_json::json!({ "output": output }));
    }
    Ok(format!("Wrote {}\n", output.display()))
}

pub fn render_comparison(comparison: &Comparison, mode: OutputMode) -> anyhow::Result<String> {
    if mode == OutputMode::Json {
        return to_json(comparison);
    }
    Ok(format!("{comparison}\n"))
}
