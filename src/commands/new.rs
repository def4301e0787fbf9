use anyhow::Result;
use colored::Colorize;

use wedo_create::runner::{self, RunReport, StepOutcome};
use wedo_create::{git, prompts, readme, wp, Environment, Project};

/// Run the full scaffold flow: prompts, repository creation, WordPress
/// setup, README rewrite, initial commit, dev server.
///
/// Returns the dev server's exit code; the caller exits with it.
pub fn execute() -> Result<i32> {
    // Seeds ACF_PRO_LICENCE for the licence prompt default
    dotenvy::from_filename(".env.local").ok();

    let answers = prompts::collect()?;

    // Abort on missing tools before the resolver touches the filesystem
    preflight()?;

    let project = Project::resolve(answers)?;

    println!(
        "\n🚀 Creating {} in {}",
        project.slug,
        project.root_dir.display()
    );

    let mut report = RunReport::new();

    runner::run(&git::create_from_template(&project), &mut report)?;

    for step in wp::sequence(&project) {
        runner::run(&step, &mut report)?;
    }
    if project.acf_pro_key.is_none() {
        report.skip("set ACF Pro licence", "no licence key provided");
    }

    let outcome = readme::rewrite(&project)?;
    report.record("rewrite readme.md", outcome);

    git::ensure_repo(&project, &mut report)?;
    git::initial_commit(&project, &mut report)?;

    report.print_summary();

    println!(
        "\n✨ Project '{}' created at {}",
        project.name,
        project.path.display()
    );
    println!("\nAdmin: http://{}.local/wp-admin", project.slug);
    println!("Starting the dev server on http://localhost:8000. Press Ctrl-C to stop.\n");

    let server = runner::run(&wp::server(&project), &mut report)?;
    Ok(match server {
        StepOutcome::Success => 0,
        StepOutcome::Failed(code) => code.unwrap_or(1),
        StepOutcome::Skipped(_) => 0,
    })
}

/// Abort before any side effect when a required tool is missing, instead
/// of failing somewhere in the middle of the sequence.
fn preflight() -> Result<()> {
    let env = Environment::detect()?;

    let missing = env.missing_required();
    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required tools: {}. Run `wedo-create doctor` for install instructions.",
            missing.join(", ")
        );
    }

    if !env.available("git") {
        eprintln!(
            "{}",
            "⚠ git not found; the project will be left uncommitted".yellow()
        );
    }

    Ok(())
}
