use anyhow::Result;
use serde::Serialize;

use wedo_create::environment::{self, Environment, OPTIONAL_TOOLS, REQUIRED_TOOLS};

#[derive(Serialize)]
struct DoctorReport {
    status: String, // "healthy", "warning", "critical"
    tools: Vec<ToolStatus>,
    github_auth: bool,
    recommendations: Vec<String>,
}

#[derive(Serialize)]
struct ToolStatus {
    name: String,
    required: bool,
    available: bool,
    version: Option<String>,
    path: Option<String>,
}

pub fn execute(json_output: bool) -> Result<i32> {
    if !json_output {
        println!("🏥 Checking scaffold tooling...");
    }

    let env = Environment::detect()?;
    let github_auth = env.available("gh") && environment::gh_authenticated();

    let mut tools = Vec::new();
    let mut recommendations = Vec::new();
    for name in REQUIRED_TOOLS.iter().chain(OPTIONAL_TOOLS.iter()) {
        let required = REQUIRED_TOOLS.contains(name);
        let info = env.tools.get(*name);
        let available = info.is_some_and(|i| i.available);

        if !available {
            recommendations.push(format!("Install {}: {}", name, install_command(name)));
        }

        tools.push(ToolStatus {
            name: name.to_string(),
            required,
            available,
            version: info.and_then(|i| i.version.clone()),
            path: info.and_then(|i| i.path.clone()),
        });
    }

    if env.available("gh") && !github_auth {
        recommendations.push("Authenticate the GitHub CLI: gh auth login".to_string());
    }

    let status = if tools.iter().any(|t| t.required && !t.available) {
        "critical"
    } else if !recommendations.is_empty() {
        "warning"
    } else {
        "healthy"
    };

    let report = DoctorReport {
        status: status.to_string(),
        tools,
        github_auth,
        recommendations,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&report);
    }

    let exit_code = match status {
        "healthy" => 0,
        "warning" => 2,
        "critical" => 3,
        _ => 1,
    };
    Ok(exit_code)
}

fn install_command(tool: &str) -> &'static str {
    match tool {
        "gh" => "brew install gh (macOS) or see https://cli.github.com",
        "wp" => "brew install wp-cli (macOS) or see https://wp-cli.org/#installing",
        "git" => "brew install git (macOS) or apt install git (Linux)",
        _ => "Check your package manager",
    }
}

fn display_report(report: &DoctorReport) {
    println!("\nExternal tools:");
    for tool in &report.tools {
        if tool.available {
            println!(
                "  ✓ {}: {}",
                tool.name,
                tool.version.as_deref().unwrap_or("detected")
            );
        } else {
            let marker = if tool.required { "✗" } else { "⚠" };
            let suffix = if tool.required { " (required)" } else { "" };
            println!("  {} {}: NOT FOUND{}", marker, tool.name, suffix);
        }
    }

    println!(
        "\nGitHub CLI auth: {}",
        if report.github_auth {
            "✓ logged in"
        } else {
            "✗ not authenticated"
        }
    );

    if !report.recommendations.is_empty() {
        println!("\nRecommendations:");
        for (i, rec) in report.recommendations.iter().enumerate() {
            println!("  {}. {}", i + 1, rec);
        }
    }
}
