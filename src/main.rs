use anyhow::{Context, Result};
use clap::Parser;

use semver_release_vars::ci::{CiContext, GitHubActionsContext, LocalContext};
use semver_release_vars::config::{self, Config};
use semver_release_vars::git::{GitHubProvider, LocalProvider};
use semver_release_vars::resolver::{self, ReleaseOutput, PACKAGE_VERSION_INPUT};
use semver_release_vars::{logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "semver-release-vars",
    about = "Compute semantic release variables (versions, tags, branches) for a CI run"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Resolve against a local git checkout instead of the GitHub API")]
    local: bool,

    #[arg(long, default_value = ".", help = "Path of the local checkout (with --local)")]
    repo_path: String,

    #[arg(short, long, help = "Trigger branch (with --local, defaults to the checked out branch)")]
    branch: Option<String>,

    #[arg(long, default_value = "local", help = "Run id used for the run branch (with --local)")]
    run_id: String,

    #[arg(long, help = "Package version (with --local)")]
    package_version: Option<String>,

    #[arg(long, help = "Enable debug logging")]
    verbose: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("semver-release-vars {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(e) = logging::init(args.verbose) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let result = if args.local {
        run_local(&args)
    } else {
        run_github(&args)
    };

    if let Err(e) = result {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<Config> {
    config::load_config(args.config.as_deref()).context("Error loading config")
}

fn run_github(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let mut ctx = GitHubActionsContext::from_env();
    if !ctx.is_github_actions() {
        tracing::warn!("GITHUB_ACTIONS is not set, use --local outside of a workflow");
    }

    match resolver::run(&mut ctx, &GitHubProvider::default(), &config) {
        Ok(output) => {
            report(&output, args.verbose);
            Ok(())
        }
        Err(e) => {
            ctx.error(&e.to_string());
            Err(e).context("failed to compute release variables")
        }
    }
}

fn run_local(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let branch = match &args.branch {
        Some(branch) => branch.clone(),
        None => LocalContext::current_branch(&args.repo_path)
            .context("Failed to determine the checked out branch")?,
    };

    let mut ctx = LocalContext::new(branch.as_str(), args.run_id.as_str(), args.repo_path.as_str());
    if let Some(version) = &args.package_version {
        ctx = ctx.with_input(PACKAGE_VERSION_INPUT, version.as_str());
    }
    ctx.debug(&format!("local checkout: {}", args.repo_path));
    ui::display_status(&format!("Resolving release variables for '{}'", branch));

    let output = resolver::run(&mut ctx, &LocalProvider::new(&args.repo_path), &config)
        .context("failed to compute release variables")?;
    report(&output, args.verbose);
    Ok(())
}

fn report(output: &ReleaseOutput, verbose: bool) {
    if verbose {
        ui::display_variables(&output.variables());
    }
    ui::display_success(&format!(
        "Release {} targets branch '{}'",
        output.version, output.target_branch
    ));
}
