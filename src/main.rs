use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{info, Level};

use kube_guardian::discovery::{get_binaries, get_config_files, get_kube_version};
use kube_guardian::models::{DiscoveryReport, OutputStyle};
use kube_guardian::output;
use kube_guardian::substitution::make_substitutions;
use kube_guardian::utils::privilege::warn_if_unprivileged;
use kube_guardian::utils::version::split_major_minor;
use kube_guardian::{ConfigTree, HostFiles, HostProcesses};

#[derive(Parser, Debug)]
#[command(name = "kube-guardian")]
#[command(author = "Kube Guardian Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Discovers Kubernetes component binaries and config files for security benchmark checks", long_about = None)]
struct Args {
    /// Component configuration file
    #[arg(long, default_value = "cfg/config.yaml")]
    config: PathBuf,

    /// Config section holding the components, e.g. master or node
    #[arg(short, long)]
    target: Option<String>,

    /// Render a controls file with $<component>bin and $<component>conf substituted
    #[arg(long)]
    controls: Option<PathBuf>,

    /// Expected kubectl client and server version, as MAJOR.MINOR
    #[arg(long, value_name = "MAJOR.MINOR")]
    expect_version: Option<String>,

    /// Output style: terminal, json
    #[arg(short, long, value_enum, default_value = "terminal")]
    output: OutputStyle,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Only show results (suppress info messages)
    #[arg(short, long)]
    quiet: bool,

    /// Skip the root privilege warning
    #[arg(long)]
    skip_privilege_check: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if !args.skip_privilege_check {
        warn_if_unprivileged();
    }

    let tree = ConfigTree::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let tree = tree.component_root(args.target.as_deref())?;

    info!("Discovering {} components", tree.components().len());

    let binaries = match get_binaries(&tree, &HostProcesses) {
        Ok(binaries) => binaries,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            std::process::exit(1);
        }
    };
    let configs = get_config_files(&tree, &HostFiles).context("looking for config files")?;

    if let Some(controls) = &args.controls {
        let text = std::fs::read_to_string(controls)
            .with_context(|| format!("reading controls {}", controls.display()))?;
        let text = make_substitutions(&text, "bin", &binaries);
        let text = make_substitutions(&text, "conf", &configs);
        print!("{}", text);
        return Ok(());
    }

    let mut report = DiscoveryReport::new(args.target.clone(), binaries, configs);

    if let Some(expected) = &args.expect_version {
        let (major, minor) = split_major_minor(expected)
            .with_context(|| format!("invalid version '{}', expected MAJOR.MINOR", expected))?;

        let version = get_kube_version().unwrap_or_default();
        let problems = version
            .check(major, minor)
            .iter()
            .map(ToString::to_string)
            .collect();

        if version.client.is_some() || version.server.is_some() {
            report = report.with_kube_version(version);
        }
        report = report.with_version_problems(problems);
    }

    output::print_report(&report, args.output);

    if !report.is_healthy() {
        std::process::exit(1);
    }

    Ok(())
}
