//! Repository creation, repair, and the initial commit.
//!
//! Handles:
//! - Creating the project repository from the starter template via `gh`
//! - Re-attaching a repository when the template clone left no `.git`
//! - Best-effort add/commit/push of the scaffolded state

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Deserialize;
use std::process::Command;

use crate::project::{Project, TEMPLATE_REPO};
use crate::runner::{self, RunReport, Step, StepOutcome};

/// Create the repository from the template and clone it into the root
/// directory, so the clone lands next to any sibling projects.
pub fn create_from_template(project: &Project) -> Step {
    Step::fatal(
        "create repository from template",
        "gh",
        &[
            "repo",
            "create",
            &project.slug,
            &format!("--template={}", TEMPLATE_REPO),
            "--public",
            "--clone",
        ],
    )
    .in_dir(&project.root_dir)
}

#[derive(Deserialize)]
struct RepoView {
    url: String,
}

/// Discover the repository URL through the GitHub CLI.
pub fn repo_url(slug: &str) -> Result<String> {
    let output = Command::new("gh")
        .args(["repo", "view", slug, "--json", "url"])
        .output()
        .context("Failed to run `gh repo view`")?;

    if !output.status.success() {
        anyhow::bail!(
            "`gh repo view {}` failed: {}",
            slug,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    parse_repo_url(&output.stdout)
}

fn parse_repo_url(raw: &[u8]) -> Result<String> {
    let view: RepoView = serde_json::from_slice(raw)
        .context("Unexpected output from `gh repo view --json url`")?;
    Ok(view.url)
}

/// Some template operations clone without a `.git` directory. Detect
/// that, warn, and try to initialize a repository and attach the remote,
/// tolerating failure at every sub-step.
pub fn ensure_repo(project: &Project, report: &mut RunReport) -> Result<()> {
    if project.path.join(".git").exists() {
        return Ok(());
    }

    eprintln!(
        "{}",
        "⚠ No .git directory found; initializing a repository and attaching the remote".yellow()
    );

    let url = match repo_url(&project.slug) {
        Ok(url) => Some(url),
        Err(err) => {
            eprintln!(
                "{}",
                format!("⚠ Could not discover the repository URL: {:#}", err).yellow()
            );
            None
        }
    };

    runner::run(
        &Step::warn("git init", "git", &["init"]).in_dir(&project.path),
        report,
    )?;

    if let Some(url) = url {
        runner::run(
            &Step::warn("attach origin remote", "git", &["remote", "add", "origin", &url])
                .in_dir(&project.path),
            report,
        )?;
        let fetched = runner::run(
            &Step::warn("fetch origin", "git", &["fetch", "origin"]).in_dir(&project.path),
            report,
        )?;
        if fetched == StepOutcome::Success {
            runner::run(
                &Step::warn(
                    "track origin/main",
                    "git",
                    &["checkout", "-b", "main", "--track", "origin/main"],
                )
                .in_dir(&project.path),
                report,
            )?;
        }
    }

    Ok(())
}

/// Stage, commit, and push the scaffolded state. Every step is
/// best-effort; a failed push must not stop the dev server from
/// starting.
pub fn initial_commit(project: &Project, report: &mut RunReport) -> Result<()> {
    runner::run(
        &Step::warn("git add", "git", &["add", "."]).in_dir(&project.path),
        report,
    )?;
    runner::run(
        &Step::warn("git commit", "git", &["commit", "-m", "Initial commit"])
            .in_dir(&project.path)
            .hint("there may be nothing to commit"),
        report,
    )?;
    runner::run(
        &Step::warn("git push", "git", &["push", "-u", "origin", "main"])
            .in_dir(&project.path)
            .hint("you may need to push or configure the remote manually"),
        report,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_project() -> Project {
        Project {
            name: "Client Site".to_string(),
            slug: "client-site-cms".to_string(),
            root_dir: PathBuf::from("/tmp/sites"),
            path: PathBuf::from("/tmp/sites/client-site-cms"),
            admin_user: "admin".to_string(),
            admin_pass: "password".to_string(),
            admin_email: "admin@example.com".to_string(),
            acf_pro_key: None,
        }
    }

    #[test]
    fn test_create_clones_from_template_into_root() {
        let step = create_from_template(&test_project());

        assert_eq!(step.program, "gh");
        assert_eq!(step.args[..3], ["repo", "create", "client-site-cms"]);
        assert!(step
            .args
            .contains(&format!("--template={}", TEMPLATE_REPO)));
        assert!(step.args.contains(&"--clone".to_string()));
        assert_eq!(step.cwd, Some(PathBuf::from("/tmp/sites")));
    }

    #[test]
    fn test_parse_repo_url() {
        let raw = br#"{"url":"https://github.com/BennyHudson/client-site-cms"}"#;
        assert_eq!(
            parse_repo_url(raw).unwrap(),
            "https://github.com/BennyHudson/client-site-cms"
        );
    }

    #[test]
    fn test_parse_repo_url_rejects_garbage() {
        assert!(parse_repo_url(b"not json").is_err());
        assert!(parse_repo_url(b"{}").is_err());
    }

    #[test]
    fn test_ensure_repo_is_a_noop_with_git_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let mut project = test_project();
        project.path = dir.path().to_path_buf();

        let mut report = RunReport::new();
        ensure_repo(&project, &mut report).unwrap();

        assert!(report.records().is_empty());
    }
}
