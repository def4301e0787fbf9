//! README rewrite after the template clone.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;

use crate::project::{Project, TEMPLATE_REPO};
use crate::runner::StepOutcome;

/// Prepend the project banner to the template's `readme.md`, keeping the
/// original content below a rule, and drop the redundant `readme.html`.
///
/// A missing `readme.md` is a warning, not an abort.
pub fn rewrite(project: &Project) -> Result<StepOutcome> {
    let readme = project.path.join("readme.md");
    if !readme.exists() {
        eprintln!(
            "{}",
            "⚠ readme.md not found in the template clone; leaving it alone".yellow()
        );
        return Ok(StepOutcome::Skipped("readme.md not found".to_string()));
    }

    let current = fs::read_to_string(&readme)
        .with_context(|| format!("Failed to read {}", readme.display()))?;
    let banner = format!(
        "Wordpress CMS for {} - Built from [wedo-headless-starter]({}) - use `wp server` to run locally.",
        project.name, TEMPLATE_REPO
    );
    fs::write(&readme, format!("{}\n\n---\n\n{}", banner, current))
        .with_context(|| format!("Failed to write {}", readme.display()))?;

    let html = project.path.join("readme.html");
    if html.exists() {
        fs::remove_file(&html)
            .with_context(|| format!("Failed to remove {}", html.display()))?;
    }

    Ok(StepOutcome::Success)
}
