/// Output formatting for discovery reports
use crate::models::{DiscoveryReport, OutputStyle};
use colored::Colorize;

pub fn print_report(report: &DiscoveryReport, style: OutputStyle) {
    match style {
        OutputStyle::Json => print_json(report),
        OutputStyle::Terminal => print_terminal(report),
    }
}

fn print_json(report: &DiscoveryReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize report: {}", e),
    }
}

fn print_terminal(report: &DiscoveryReport) {
    println!("\n{}", "═".repeat(60));
    match &report.target {
        Some(target) => println!("{}", format!("  COMPONENTS ({})", target).bold()),
        None => println!("{}", "  COMPONENTS".bold()),
    }
    println!("{}", "═".repeat(60));

    let names = report.component_names();
    if names.is_empty() {
        println!("\n  No components configured");
    }

    for name in names {
        println!("\n{}", name.bold());
        println!("   binary: {}", describe(report.binaries.get(name)));
        println!("   config: {}", describe(report.configs.get(name)));
    }

    if let Some(version) = &report.kube_version {
        println!("\n{}", "Kubernetes version:".bold());
        println!("   client: {}", describe(version.client.as_ref()));
        println!("   server: {}", describe(version.server.as_ref()));
    }

    if !report.version_problems.is_empty() {
        println!();
        for problem in &report.version_problems {
            println!("{} {}", "✗".red().bold(), problem.red());
        }
    }
}

fn describe(value: Option<&String>) -> String {
    match value {
        Some(v) => v.green().to_string(),
        None => "-".dimmed().to_string(),
    }
}
