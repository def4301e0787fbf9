use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::process::Command;

/// Tools the scaffold cannot work without.
pub const REQUIRED_TOOLS: [&str; 2] = ["gh", "wp"];

/// Tools the scaffold degrades without.
pub const OPTIONAL_TOOLS: [&str; 1] = ["git"];

#[derive(Debug, Serialize, Deserialize)]
pub struct Environment {
    pub tools: HashMap<String, ToolInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolInfo {
    pub available: bool,
    pub version: Option<String>,
    pub path: Option<String>,
}

impl Environment {
    /// Probe the external tools the pipeline shells out to.
    pub fn detect() -> Result<Self> {
        let mut env = Environment {
            tools: HashMap::new(),
        };

        let tools_to_check: [(&str, &[&str]); 3] = [
            ("gh", &["--version"]),
            ("wp", &["cli", "version"]),
            ("git", &["--version"]),
        ];

        for (tool_name, args) in tools_to_check {
            let mut tool_info = ToolInfo {
                available: false,
                version: None,
                path: None,
            };

            if let Ok(path) = which::which(tool_name) {
                tool_info.available = true;
                tool_info.path = Some(path.display().to_string());

                // Try to get version
                if let Ok(output) = Command::new(tool_name).args(args).output() {
                    let version_str = String::from_utf8_lossy(&output.stdout);
                    if !version_str.is_empty() {
                        tool_info.version =
                            Some(version_str.lines().next().unwrap_or("").to_string());
                    }
                }
            }

            env.tools.insert(tool_name.to_string(), tool_info);
        }

        Ok(env)
    }

    pub fn available(&self, tool: &str) -> bool {
        self.tools.get(tool).is_some_and(|info| info.available)
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_TOOLS
            .iter()
            .copied()
            .filter(|tool| !self.available(tool))
            .collect()
    }
}

/// Whether the GitHub CLI has stored credentials.
pub fn gh_authenticated() -> bool {
    Command::new("gh")
        .args(["auth", "status"])
        .output()
        .is_ok_and(|output| output.status.success())
}
