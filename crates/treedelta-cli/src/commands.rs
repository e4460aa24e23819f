use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use tracing::debug;

use treedelta_diff::{compare_with, Diff};
use treedelta_format::format_diff;
use treedelta_types::Value;

use crate::cli::*;
use crate::config::Config;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let fail = cli.exit_code;
    let differs = run_diff(cli)?;
    if fail && differs {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Compare the two documents and print the result. Returns whether they
/// differ.
fn run_diff(cli: Cli) -> anyhow::Result<bool> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_flags(&cli);
    colored::control::set_override(config.format.colored);

    let left = read_value(&cli.left)?;
    let right = read_value(&cli.right)?;
    let diff = compare_with(&left, &right, &config.compare).with_context(|| {
        format!(
            "failed to compare {} with {}",
            cli.left.display(),
            cli.right.display()
        )
    })?;
    debug!(
        deltas = diff.len(),
        similarity = diff.similarity(),
        "compared documents"
    );

    println!("{}", render(&cli.output, &config, &diff, &left)?);
    Ok(!diff.is_empty())
}

fn read_value(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Value::from_json_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn render(output: &OutputFormat, config: &Config, diff: &Diff, left: &Value) -> anyhow::Result<String> {
    match output {
        OutputFormat::Text if diff.is_empty() => Ok("No changes.".to_string()),
        OutputFormat::Text => Ok(format_diff(diff, left, &config.format)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(diff)?),
        OutputFormat::Summary => Ok(summary(diff)),
    }
}

fn summary(diff: &Diff) -> String {
    if diff.is_empty() {
        return format!("{} No changes.", "✓".green().bold());
    }
    [
        format!("Similarity: {}", format!("{:.3}", diff.similarity()).bold()),
        format!("  {} {} added", "+".green(), diff.additions()),
        format!("  {} {} deleted", "-".red(), diff.deletions()),
        format!("  {} {} modified", "~".yellow(), diff.modifications()),
        format!("  {} {} moved", ">".cyan(), diff.moves()),
    ]
    .join("\n")
}
