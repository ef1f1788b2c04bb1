use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::license::catalog::{LicenseFamily, CATALOG};
use crate::models::{Classification, ScoreResult};

/// Render a colored terminal report for a classified license file.
pub fn render(path: &Path, classification: &Classification, top: usize, quiet: bool) {
    let license = classification.license;

    if quiet {
        println!(
            "{}  {}  {}",
            license.slug().bold(),
            format_score(classification.score),
            path.display()
        );
        return;
    }

    print_header(path);

    let rows = [
        format!("License : {}", license.name()),
        format!("Slug    : {}", license.slug()),
        format!("Score   : {}", format_score(classification.score)),
        format!("URL     : {}", license.url()),
    ];
    for line in summary_box("MATCH", &rows) {
        println!("{line}");
    }
    println!();

    if top > 0 {
        println!(" {} Closest catalog licenses:\n", "[RANK]".cyan().bold());
        render_ranking(&classification.ranking(), top);
        println!();
    }
}

/// Report that `path` holds no recognizable license file.
pub fn render_no_match(path: &Path, quiet: bool) {
    if quiet {
        println!("{}  {}", "none".red().bold(), path.display());
        return;
    }
    print_header(path);
    println!(" {} No license file found\n", "✗".red());
}

/// Print the catalog and the family labels.
pub fn render_catalog() {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Slug").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Family").add_attribute(Attribute::Bold),
            Cell::new("URL").add_attribute(Attribute::Bold),
        ]);

    for license in CATALOG {
        let family = license.family().map(|f| f.slug()).unwrap_or("");
        table.add_row(vec![
            Cell::new(license.slug()),
            Cell::new(license.name()),
            Cell::new(family).fg(Color::DarkGrey),
            Cell::new(license.url()),
        ]);
    }
    println!("{}", table);

    println!("\n {} Families (labels only, never matched):", "[INFO]".cyan().bold());
    for family in LicenseFamily::ALL {
        println!("   {:<5} {}", family.slug(), family.name());
    }
}

fn print_header(path: &Path) {
    println!(
        "\n {} v{}",
        "license-matchr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Checking: {}\n", path.display());
}

fn render_ranking(ranking: &[ScoreResult], top: usize) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Slug").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
        ]);

    for (rank, result) in ranking.iter().take(top).enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(result.license.name()),
            Cell::new(result.license.slug()),
            Cell::new(format!("{:.3}", result.score))
                .fg(score_color(result.score))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}

fn score_color(score: f64) -> Color {
    if score >= 0.9 {
        Color::Green
    } else if score >= 0.5 {
        Color::Yellow
    } else {
        Color::Red
    }
}

const MIN_BOX_WIDTH: usize = 48;

/// Box drawn around a bold `title` and `rows`, widened to fit the longest row.
fn summary_box(title: &str, rows: &[String]) -> Vec<String> {
    let width = rows
        .iter()
        .map(|row| row.chars().count())
        .chain([title.chars().count(), MIN_BOX_WIDTH])
        .max()
        .unwrap_or(MIN_BOX_WIDTH);
    let rule = "─".repeat(width + 4);

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(format!(" ┌{rule}┐"));
    lines.push(format!(" │  {:<width$}  │", title.bold()));
    lines.extend(rows.iter().map(|row| format!(" │  {row:<width$}  │")));
    lines.push(format!(" └{rule}┘"));
    lines
}

fn format_score(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}
