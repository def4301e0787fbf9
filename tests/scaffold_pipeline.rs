//! End-to-end pipeline behaviour against stub executables
//!
//! Run with: cargo test --test scaffold_pipeline -- --nocapture

use std::fs;
use std::path::PathBuf;

use wedo_create::runner::{self, RunReport, Step, StepOutcome};
use wedo_create::{readme, wp, Project};

fn test_project(path: PathBuf) -> Project {
    Project {
        name: "My WordPress Project".to_string(),
        slug: "my-wordpress-project-cms".to_string(),
        root_dir: path.parent().unwrap().to_path_buf(),
        path,
        admin_user: "admin".to_string(),
        admin_pass: "password".to_string(),
        admin_email: "admin@example.com".to_string(),
        acf_pro_key: None,
    }
}

#[test]
fn test_warn_failure_still_reaches_later_steps() {
    let dir = tempfile::tempdir().unwrap();
    let witness = dir.path().join("server-started");
    let mut report = RunReport::new();

    // A failed push must not stop the dev-server step
    let push = Step::warn("git push", "sh", &["-c", "exit 1"]);
    let server = Step::warn(
        "start dev server",
        "sh",
        &["-c", &format!("touch {}", witness.display())],
    );

    runner::run(&push, &mut report).unwrap();
    runner::run(&server, &mut report).unwrap();

    assert!(witness.exists());
    assert_eq!(report.failures(), 1);
    let labels: Vec<_> = report.records().iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["git push", "start dev server"]);
}

#[test]
fn test_post_clone_readme_rewrite() {
    // Simulate a fresh template clone
    let dir = tempfile::tempdir().unwrap();
    let clone = dir.path().join("my-wordpress-project-cms");
    fs::create_dir(&clone).unwrap();
    fs::write(clone.join("readme.md"), "# wedo-headless-starter\n").unwrap();
    fs::write(clone.join("readme.html"), "<html></html>").unwrap();

    let project = test_project(clone.clone());
    let mut report = RunReport::new();
    let outcome = readme::rewrite(&project).unwrap();
    report.record("rewrite readme.md", outcome);

    let rewritten = fs::read_to_string(clone.join("readme.md")).unwrap();
    assert!(rewritten.starts_with("Wordpress CMS for My WordPress Project"));
    assert!(rewritten.ends_with("# wedo-headless-starter\n"));
    assert!(!clone.join("readme.html").exists());
    assert_eq!(report.records()[0].outcome, StepOutcome::Success);
}

#[cfg(unix)]
#[test]
fn test_wp_sequence_runs_in_order_against_stub() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("bin");
    fs::create_dir(&bin).unwrap();
    let log = dir.path().join("wp.log");

    // Stub `wp` that records its argument list
    let stub = bin.join("wp");
    fs::write(
        &stub,
        format!("#!/bin/sh\necho \"$@\" >> {}\n", log.display()),
    )
    .unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    let old_path = std::env::var("PATH").unwrap_or_default();
    std::env::set_var("PATH", format!("{}:{}", bin.display(), old_path));

    let project = test_project(dir.path().join("my-wordpress-project-cms"));
    let mut report = RunReport::new();
    for step in wp::sequence(&project) {
        runner::run(&step, &mut report).unwrap();
    }

    std::env::set_var("PATH", old_path);

    let logged = fs::read_to_string(&log).unwrap();
    let lines: Vec<_> = logged.lines().collect();
    assert_eq!(lines.len(), 10);
    assert!(lines[0].starts_with("core download"));
    assert!(lines[9].starts_with("theme activate wedo-headless"));
    assert!(report
        .records()
        .iter()
        .all(|r| r.outcome == StepOutcome::Success));
}
