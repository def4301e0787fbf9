//! Interactive prompt collection for the scaffold flow.
//!
//! Every question carries a default so the whole flow also works
//! non-interactively: when stdin is not a TTY each question resolves to
//! its default.

use anyhow::{Context, Result};
use std::env;
use std::io::{self, Write};

/// Raw prompt answers, before slug and path derivation.
pub struct Answers {
    pub root_dir: String,
    pub project_name: String,
    pub admin_user: String,
    pub admin_pass: String,
    pub admin_email: String,
    /// Empty means "skip licensing"
    pub acf_pro_key: String,
}

/// Ask the question sequence and return the answers.
///
/// The licence default comes from `ACF_PRO_LICENCE`, which the caller
/// seeds from `.env.local` before prompting.
pub fn collect() -> Result<Answers> {
    let interactive = atty::is(atty::Stream::Stdin);
    let cwd = env::current_dir().context("Failed to resolve the current directory")?;
    let default_root = cwd.display().to_string();
    let default_key = env::var("ACF_PRO_LICENCE").unwrap_or_default();

    Ok(Answers {
        root_dir: ask("Where should we create the project?", &default_root, interactive)?,
        project_name: ask("What is the project name?", "My WordPress Project", interactive)?,
        admin_user: ask("WordPress admin username?", "admin", interactive)?,
        admin_pass: ask_password("WordPress admin password?", "password", interactive)?,
        admin_email: ask("WordPress admin email?", "admin@example.com", interactive)?,
        acf_pro_key: ask(
            "Do you have an ACF Pro licence key? (leave blank to skip)",
            &default_key,
            interactive,
        )?,
    })
}

fn ask(message: &str, default: &str, interactive: bool) -> Result<String> {
    if !interactive {
        return Ok(default.to_string());
    }

    if default.is_empty() {
        print!("{} ", message);
    } else {
        print!("{} [{}] ", message, default);
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let trimmed = input.trim();
    Ok(if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    })
}

fn ask_password(message: &str, default: &str, interactive: bool) -> Result<String> {
    if !interactive {
        return Ok(default.to_string());
    }

    print!("{} [{}] ", message, default);
    io::stdout().flush()?;

    let entered = console::Term::stdout()
        .read_secure_line()
        .context("Failed to read password input")?;

    let trimmed = entered.trim();
    Ok(if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    })
}
