//! WP-CLI step builders.
//!
//! Each builder produces a `Step` with the argument list the pipeline
//! runs; nothing here touches the filesystem or spawns anything itself.

use crate::project::Project;
use crate::runner::Step;

/// Headless theme shipped by the starter template.
pub const HEADLESS_THEME: &str = "wedo-headless";

/// SEO plugins installed on top of the template's own set.
pub const SEO_PLUGINS: [&str; 2] = ["add-wpgraphql-seo", "wordpress-seo"];

const SERVER_PORT: u16 = 8000;

fn path_arg(project: &Project) -> String {
    format!("--path={}", project.path.display())
}

pub fn core_download(project: &Project) -> Step {
    Step::fatal(
        "download WordPress core",
        "wp",
        &["core", "download", &path_arg(project), "--skip-content"],
    )
}

pub fn config_create(project: &Project) -> Step {
    Step::fatal(
        "create wp-config.php",
        "wp",
        &[
            "config",
            "create",
            &path_arg(project),
            &format!("--dbname={}", project.slug),
            "--dbuser=root",
            "--dbpass=root",
            "--dbhost=127.0.0.1",
        ],
    )
}

pub fn db_create(project: &Project) -> Step {
    Step::warn("create database", "wp", &["db", "create", &path_arg(project)])
        .hint("the database may already exist")
}

pub fn set_licence(project: &Project, key: &str) -> Step {
    Step::warn(
        "set ACF Pro licence",
        "wp",
        &["config", "set", "ACF_PRO_LICENCE", key, &path_arg(project)],
    )
}

pub fn core_install(project: &Project) -> Step {
    Step::fatal(
        "install WordPress",
        "wp",
        &[
            "core",
            "install",
            &path_arg(project),
            &format!("--url={}.local", project.slug),
            &format!("--title={}", project.name),
            &format!("--admin_user={}", project.admin_user),
            &format!("--admin_password={}", project.admin_pass),
            &format!("--admin_email={}", project.admin_email),
        ],
    )
}

pub fn plugin_update_all(project: &Project) -> Step {
    Step::warn(
        "update plugins",
        "wp",
        &["plugin", "update", "--all", &path_arg(project)],
    )
}

pub fn plugin_activate_all(project: &Project) -> Step {
    Step::warn(
        "activate plugins",
        "wp",
        &["plugin", "activate", "--all", &path_arg(project)],
    )
}

pub fn install_seo_plugins(project: &Project) -> Step {
    Step::warn(
        "install SEO plugins",
        "wp",
        &[
            "plugin",
            "install",
            SEO_PLUGINS[0],
            SEO_PLUGINS[1],
            "--activate",
            &path_arg(project),
        ],
    )
}

pub fn language_plugin_update(project: &Project) -> Step {
    Step::warn(
        "update plugin translations",
        "wp",
        &["language", "plugin", "update", "--all", &path_arg(project)],
    )
}

pub fn language_theme_update(project: &Project) -> Step {
    Step::warn(
        "update theme translations",
        "wp",
        &["language", "theme", "update", "--all", &path_arg(project)],
    )
}

pub fn theme_activate(project: &Project) -> Step {
    Step::warn(
        "activate headless theme",
        "wp",
        &["theme", "activate", HEADLESS_THEME, &path_arg(project)],
    )
}

pub fn server(project: &Project) -> Step {
    Step::warn(
        "start dev server",
        "wp",
        &[
            "server",
            &path_arg(project),
            &format!("--port={}", SERVER_PORT),
            "--quiet",
        ],
    )
}

/// The ordered WordPress configuration sequence. The licence step is
/// present only when a key was given.
pub fn sequence(project: &Project) -> Vec<Step> {
    let mut steps = vec![
        core_download(project),
        config_create(project),
        db_create(project),
    ];
    if let Some(key) = &project.acf_pro_key {
        steps.push(set_licence(project, key));
    }
    steps.extend([
        core_install(project),
        plugin_update_all(project),
        plugin_activate_all(project),
        install_seo_plugins(project),
        language_plugin_update(project),
        language_theme_update(project),
        theme_activate(project),
    ]);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::FailurePolicy;
    use std::path::PathBuf;

    fn test_project(key: Option<&str>) -> Project {
        Project {
            name: "My WordPress Project".to_string(),
            slug: "my-wordpress-project-cms".to_string(),
            root_dir: PathBuf::from("/tmp/sites"),
            path: PathBuf::from("/tmp/sites/my-wordpress-project-cms"),
            admin_user: "admin".to_string(),
            admin_pass: "password".to_string(),
            admin_email: "admin@example.com".to_string(),
            acf_pro_key: key.map(|k| k.to_string()),
        }
    }

    #[test]
    fn test_sequence_without_key_has_no_licence_step() {
        let steps = sequence(&test_project(None));

        assert_eq!(steps.len(), 10);
        assert!(steps
            .iter()
            .all(|s| !s.args.iter().any(|a| a == "ACF_PRO_LICENCE")));
    }

    #[test]
    fn test_sequence_with_key_sets_licence_before_install() {
        let steps = sequence(&test_project(Some("abc123")));

        assert_eq!(steps.len(), 11);
        assert_eq!(steps[3].args[..4], ["config", "set", "ACF_PRO_LICENCE", "abc123"]);
        assert!(steps[4].args.starts_with(&["core".to_string(), "install".to_string()]));
    }

    #[test]
    fn test_every_step_targets_the_project_path() {
        let project = test_project(Some("abc123"));
        let expected = format!("--path={}", project.path.display());

        for step in sequence(&project) {
            assert_eq!(step.program, "wp");
            assert!(
                step.args.contains(&expected),
                "step '{}' is missing the path argument",
                step.label
            );
        }
    }

    #[test]
    fn test_install_carries_admin_credentials_and_local_url() {
        let args = core_install(&test_project(None)).args;

        assert!(args.contains(&"--url=my-wordpress-project-cms.local".to_string()));
        assert!(args.contains(&"--title=My WordPress Project".to_string()));
        assert!(args.contains(&"--admin_user=admin".to_string()));
        assert!(args.contains(&"--admin_password=password".to_string()));
        assert!(args.contains(&"--admin_email=admin@example.com".to_string()));
    }

    #[test]
    fn test_failure_policies() {
        let project = test_project(None);

        // Without these there is no project worth continuing with
        assert_eq!(core_download(&project).policy, FailurePolicy::Fatal);
        assert_eq!(config_create(&project).policy, FailurePolicy::Fatal);
        assert_eq!(core_install(&project).policy, FailurePolicy::Fatal);

        // Everything else degrades gracefully
        assert_eq!(db_create(&project).policy, FailurePolicy::Warn);
        assert_eq!(theme_activate(&project).policy, FailurePolicy::Warn);
        assert_eq!(server(&project).policy, FailurePolicy::Warn);
    }

    #[test]
    fn test_server_listens_on_fixed_port() {
        let args = server(&test_project(None)).args;

        assert_eq!(args[0], "server");
        assert!(args.contains(&"--port=8000".to_string()));
        assert!(args.contains(&"--quiet".to_string()));
    }

    #[test]
    fn test_theme_activation_targets_headless_theme() {
        let args = theme_activate(&test_project(None)).args;
        assert_eq!(args[..3], ["theme", "activate", "wedo-headless"]);
    }
}
