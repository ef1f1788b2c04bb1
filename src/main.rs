//! `license-matchr`: identify the license of a file or project.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install the `tracing` subscriber.
//! 2. Load config ([`config::load_config`]); CLI flags override it.
//! 3. Classify the given file, or detect the project's license file when a
//!    directory is given ([`license::classifier::Classifier`]).
//! 4. Render the requested report ([`report`]).
//! 5. Exit `0` on a match, `1` when no license file was found.

mod cli;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, ReportFormat};
use license_matchr::config::load_config;
use license_matchr::models::Detection;
use license_matchr::report;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.list {
        report::terminal::render_catalog();
        return Ok(());
    }

    // Resolve the target path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());
    let project_dir = if path.is_dir() {
        path.clone()
    } else {
        path.parent().map(|p| p.to_path_buf()).unwrap_or_else(|| path.clone())
    };

    // Load config; flags take precedence
    let mut config = load_config(&project_dir, cli.config.as_deref())?;
    if let Some(jobs) = cli.jobs {
        config.classifier.jobs = jobs;
    }
    if let Some(dir) = cli.licenses_dir {
        config.classifier.licenses_dir = Some(dir);
    }
    let top = cli.top.unwrap_or(config.report.top);

    let classifier = config.classifier();

    if !cli.quiet && matches!(cli.report, ReportFormat::Terminal) {
        eprintln!(
            "  {} scoring against {} licenses ({} jobs)",
            "→".cyan(),
            license_matchr::license::CATALOG.len(),
            classifier.job_count()
        );
    }

    let detected = if path.is_dir() {
        classifier.classify_dir(&path).await?
    } else {
        classifier
            .classify(&path)
            .await?
            .map(|classification| (path.clone(), classification))
    };

    let Some((file, classification)) = detected else {
        match cli.report {
            ReportFormat::Terminal => report::terminal::render_no_match(&path, cli.quiet),
            ReportFormat::Json => println!("null"),
            ReportFormat::Pom => eprintln!("No license file found in {}", path.display()),
        }
        std::process::exit(1);
    };

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&file, &classification, top, cli.quiet);
        }
        ReportFormat::Json => {
            let detection = Detection::new(file, &classification, top);
            println!("{}", serde_json::to_string_pretty(&detection)?);
        }
        ReportFormat::Pom => {
            println!("{}", report::pom::render(classification.license)?);
        }
    }

    Ok(())
}
