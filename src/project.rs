//! Project naming and destination-path resolution.
//!
//! Handles:
//! - Slug derivation from the human-readable project name
//! - Root directory creation and tilde expansion
//! - Collision-free destination selection

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::prompts::Answers;

/// Starter repository every project is created from.
pub const TEMPLATE_REPO: &str = "https://github.com/BennyHudson/wedo-headless-starter";

/// Everything the pipeline needs to know about the project being created.
///
/// Built once from prompt answers and never persisted.
#[derive(Debug, Clone)]
pub struct Project {
    /// Human-readable name, used for the site title and README banner
    pub name: String,
    /// Derived kebab-case identifier with the `-cms` suffix
    pub slug: String,
    /// Directory the project is created under
    pub root_dir: PathBuf,
    /// `root_dir` joined with `slug`
    pub path: PathBuf,
    pub admin_user: String,
    pub admin_pass: String,
    pub admin_email: String,
    /// `None` means the licensing step is skipped
    pub acf_pro_key: Option<String>,
}

impl Project {
    /// Turn prompt answers into a resolved project, creating the root
    /// directory and picking a destination that does not exist yet.
    pub fn resolve(answers: Answers) -> Result<Self> {
        let root_dir = PathBuf::from(shellexpand::tilde(answers.root_dir.trim()).as_ref());
        fs::create_dir_all(&root_dir).with_context(|| {
            format!("Failed to create root directory: {}", root_dir.display())
        })?;

        let base = slugify(&answers.project_name);
        let (slug, path) = resolve_destination(&root_dir, &base);
        if slug != base {
            eprintln!(
                "{}",
                format!("⚠ Target path exists; using unique project name: {}", slug).yellow()
            );
        }

        let key = answers.acf_pro_key.trim().to_string();
        Ok(Project {
            name: answers.project_name,
            slug,
            root_dir,
            path,
            admin_user: answers.admin_user,
            admin_pass: answers.admin_pass,
            admin_email: answers.admin_email,
            acf_pro_key: if key.is_empty() { None } else { Some(key) },
        })
    }
}

/// Derive the project slug: kebab-case plus the `-cms` suffix.
///
/// The literal `WordPress` is normalized first so the slug reads
/// `wordpress`, not `word-press`.
pub fn slugify(name: &str) -> String {
    format!("{}-cms", kebab_case(&name.replace("WordPress", "wordpress")))
}

/// Lowercase, hyphen-separated words. Word boundaries sit at
/// non-alphanumeric runs and at camel-case transitions, including the
/// `HTTPServer` style where a run of capitals ends before a lowercase
/// letter.
pub fn kebab_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() && c.is_uppercase() {
            // current is non-empty, so the previous char was alphanumeric
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.join("-")
}

/// Pick a destination under `root` that does not exist yet.
///
/// Returns the (possibly renamed) slug and the full path. On collision
/// the slug gets a timestamp suffix. Best-effort only: a race with
/// another writer after the check is not handled.
pub fn resolve_destination(root: &Path, slug: &str) -> (String, PathBuf) {
    let path = root.join(slug);
    if !path.exists() {
        return (slug.to_string(), path);
    }

    let unique = format!("{}-{}", slug, timestamp());
    let path = root.join(&unique);
    (unique, path)
}

/// Current timestamp for unique names
fn timestamp() -> String {
    Utc::now().format("%Y%m%d-%H%M%S").to_string()
}
