use branch_warden_core::{run_setup_with_token, RepositoryRef, SetupConfig, SetupResult};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod errors;
use errors::Error;

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// Branch Warden CLI: apply branch protection rules and repository settings
#[derive(Parser)]
#[command(name = "branch-warden")]
#[command(about = "Apply branch protection rules and repository settings to a GitHub repository", long_about = None)]
struct Cli {
    /// Repository owner (user or organization)
    owner: Option<String>,

    /// Repository name
    repo: Option<String>,

    /// GitHub personal access token; falls back to the GITHUB_TOKEN environment variable
    token: Option<String>,
}

/// Picks the token to use: the command-line argument wins, then the environment.
///
/// An empty argument counts as absent, matching how the original shell usage
/// treats `branch-warden owner repo ""`.
fn resolve_token(argument: Option<String>, env_token: Option<String>) -> Result<String, Error> {
    argument
        .filter(|token| !token.is_empty())
        .or(env_token)
        .ok_or(Error::MissingToken)
}

async fn execute(
    repository: &RepositoryRef,
    config: &SetupConfig,
    token: &str,
) -> Result<SetupResult, Error> {
    Ok(run_setup_with_token(repository, config, token).await?)
}

fn print_report(result: &SetupResult) {
    println!();
    println!("{}", "Setup summary".blue().bold());
    println!("{}", "=============".blue().bold());

    for outcome in &result.branches {
        if outcome.protected {
            match outcome.verified_reviews {
                Some(required_reviews) => println!(
                    "  {} {}: protected (requires {} approvals)",
                    "✓".green(),
                    outcome.branch,
                    required_reviews
                ),
                None => println!(
                    "  {} {}: protected (verification failed {})",
                    "✓".green(),
                    outcome.branch,
                    "⚠".yellow()
                ),
            }
        } else {
            println!("  {} {}: not protected", "✗".red(), outcome.branch);
        }
    }

    if result.settings_applied {
        println!("  {} Merge policy set to squash-only", "✓".green());
    } else {
        println!(
            "  {} Repository settings could not be updated",
            "⚠".yellow()
        );
    }

    if let Some(security) = &result.security {
        if security.vulnerability_alerts {
            println!("  {} Vulnerability alerts enabled", "✓".green());
        } else {
            println!("  {} Could not enable vulnerability alerts", "⚠".yellow());
        }
        if security.automated_fixes {
            println!("  {} Automated security fixes enabled", "✓".green());
        } else {
            println!(
                "  {} Could not enable automated security fixes",
                "⚠".yellow()
            );
        }
    }

    println!();
    if result.overall_success {
        println!(
            "{} {}",
            "✓".green(),
            format!(
                "Branch protection configured for {}: {}",
                result.repository,
                result.protected_branches().join(", ")
            )
            .green()
        );
        println!();
        println!("Test the protection with a direct push:");
        println!("  git checkout {}", result.protected_branches()[0]);
        println!("  git commit --allow-empty -m \"test: direct commit\"");
        println!("  git push");
        println!();
        println!("Expected: GitHub rejects the push with a protection error.");
    } else {
        println!(
            "{} {}",
            "✗".red(),
            format!("No branches were protected for {}", result.repository).red()
        );
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("BRANCH_WARDEN_LOG"))
        .init();

    let cli = Cli::parse();

    // Fewer than two positional arguments behaves exactly like --help: usage text
    // and a zero exit code.
    let (owner, repo) = match (cli.owner, cli.repo) {
        (Some(owner), Some(repo)) => (owner, repo),
        _ => {
            let mut command = Cli::command();
            command.print_help().ok();
            std::process::exit(0);
        }
    };

    let token = match resolve_token(cli.token, std::env::var("GITHUB_TOKEN").ok()) {
        Ok(token) => token,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e.to_string().red());
            eprintln!("Set the GITHUB_TOKEN environment variable or pass the token as the third argument.");
            eprintln!("Create one at: https://github.com/settings/tokens");
            std::process::exit(1);
        }
    };

    println!("{}", "Branch Protection Setup".blue().bold());
    println!("{}", "=======================".blue().bold());

    let repository = RepositoryRef::new(owner, repo);
    let config = SetupConfig::default();

    match execute(&repository, &config, &token).await {
        Ok(result) => {
            print_report(&result);
            std::process::exit(if result.overall_success { 0 } else { 1 });
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red(), format!("Setup failed: {e}").red());
            std::process::exit(1);
        }
    }
}
