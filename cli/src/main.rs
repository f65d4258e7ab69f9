//! numark CLI - statement PDF highlighting tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use numark::{mark_pair, HighlightColor, HighlightOutcome, MarkJob, Marker, RosterOptions};

#[derive(Parser)]
#[command(name = "numark")]
#[command(version)]
#[command(about = "Highlight number lists in statement PDFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Highlight targets in one PDF and write a filtered copy
    Mark {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to <input>_highlighted.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Target numbers, comma separated
        #[arg(long, value_name = "NUMBERS", value_delimiter = ',')]
        numbers: Vec<String>,

        /// Roster spreadsheet to load targets from
        #[arg(long, value_name = "FILE", conflicts_with = "numbers")]
        roster: Option<PathBuf>,

        /// Roster column holding the targets
        #[arg(long, value_name = "NAME", requires = "roster")]
        column: Option<String>,

        /// Roster sheet name (first sheet if omitted)
        #[arg(long, value_name = "NAME", requires = "roster")]
        sheet: Option<String>,

        /// Banner rows to skip before the roster header
        #[arg(long, value_name = "N", default_value = "6")]
        skip_rows: usize,

        /// Highlight color: palette name or "r,g,b" in [0,1]
        #[arg(long, default_value = "light-blue")]
        color: HighlightColor,

        /// Print the outcome as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Mark a PF and an ESIC statement against one roster, in parallel
    Run {
        /// PF statement PDF
        #[arg(long, value_name = "FILE")]
        pf: PathBuf,

        /// ESIC statement PDF
        #[arg(long, value_name = "FILE")]
        esic: PathBuf,

        /// Roster spreadsheet
        #[arg(long, value_name = "FILE")]
        roster: PathBuf,

        /// Column holding UAN numbers
        #[arg(long, value_name = "NAME", default_value = "UAN No.")]
        uan_column: String,

        /// Column holding ESI numbers
        #[arg(long, value_name = "NAME", default_value = "ESI No")]
        esi_column: String,

        /// Roster sheet name (first sheet if omitted)
        #[arg(long, value_name = "NAME")]
        sheet: Option<String>,

        /// Banner rows to skip before the roster header
        #[arg(long, value_name = "N", default_value = "6")]
        skip_rows: usize,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Highlight color: palette name or "r,g,b" in [0,1]
        #[arg(long, default_value = "light-blue")]
        color: HighlightColor,
    },

    /// Show the normalized target list a roster column yields
    Targets {
        /// Roster spreadsheet
        #[arg(value_name = "FILE")]
        roster: PathBuf,

        /// Column holding the targets
        #[arg(long, value_name = "NAME")]
        column: String,

        /// Roster sheet name (first sheet if omitted)
        #[arg(long, value_name = "NAME")]
        sheet: Option<String>,

        /// Banner rows to skip before the roster header
        #[arg(long, value_name = "N", default_value = "6")]
        skip_rows: usize,
    },

    /// List the named highlight colors
    Colors,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Mark {
            input,
            output,
            numbers,
            roster,
            column,
            sheet,
            skip_rows,
            color,
            json,
        } => cmd_mark(
            &input,
            output.as_deref(),
            numbers,
            roster.as_deref(),
            column.as_deref(),
            sheet,
            skip_rows,
            color,
            json,
        ),
        Commands::Run {
            pf,
            esic,
            roster,
            uan_column,
            esi_column,
            sheet,
            skip_rows,
            output,
            color,
        } => cmd_run(
            &pf,
            &esic,
            &roster,
            &uan_column,
            &esi_column,
            sheet,
            skip_rows,
            &output,
            color,
        ),
        Commands::Targets {
            roster,
            column,
            sheet,
            skip_rows,
        } => cmd_targets(&roster, &column, sheet, skip_rows),
        Commands::Colors => {
            cmd_colors();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_mark(
    input: &Path,
    output: Option<&Path>,
    numbers: Vec<String>,
    roster: Option<&Path>,
    column: Option<&str>,
    sheet: Option<String>,
    skip_rows: usize,
    color: HighlightColor,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let targets = match roster {
        Some(path) => {
            let column = column.ok_or("--column is required with --roster")?;
            numark::load_targets(path, column, &roster_options(sheet, skip_rows))?
        }
        None => numbers,
    };
    if targets.is_empty() {
        println!(
            "{}",
            "Warning: no targets given, output keeps only the first page".yellow()
        );
    }

    let output = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{}_highlighted.pdf", stem))
    });

    let pb = spinner("Marking...");
    let outcome = Marker::new()
        .with_targets(targets)
        .with_color(color)
        .mark(input, &output)?;
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_report(input, &output, &outcome);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    pf: &Path,
    esic: &Path,
    roster: &Path,
    uan_column: &str,
    esi_column: &str,
    sheet: Option<String>,
    skip_rows: usize,
    output_dir: &Path,
    color: HighlightColor,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = roster_options(sheet, skip_rows);
    let uan_targets = numark::load_targets(roster, uan_column, &options)?;
    let esi_targets = numark::load_targets(roster, esi_column, &options)?;

    std::fs::create_dir_all(output_dir)?;
    let prefix = roster_prefix(roster);
    let pf_out = output_dir.join(format!("{}_PF_highlighted.pdf", prefix));
    let esic_out = output_dir.join(format!("{}_ESIC_highlighted.pdf", prefix));

    let pf_job = MarkJob::new(pf, &pf_out, uan_targets);
    let esic_job = MarkJob::new(esic, &esic_out, esi_targets);

    let pb = spinner("Marking PF and ESIC statements...");
    let (pf_result, esic_result) = mark_pair(&pf_job, &esic_job, color);
    pb.finish_and_clear();

    print_report(pf, &pf_out, &pf_result?);
    println!();
    print_report(esic, &esic_out, &esic_result?);

    Ok(())
}

fn cmd_targets(
    roster: &Path,
    column: &str,
    sheet: Option<String>,
    skip_rows: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let targets = numark::load_targets(roster, column, &roster_options(sheet, skip_rows))?;

    println!(
        "{} {} target(s) from column {:?}",
        "Loaded".green().bold(),
        targets.len(),
        column
    );
    for target in &targets {
        println!("{}", target);
    }

    Ok(())
}

fn cmd_colors() {
    println!("{}", "Highlight colors".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (name, color) in HighlightColor::palette() {
        let marker = if *color == HighlightColor::default() {
            " (default)"
        } else {
            ""
        };
        println!("{:12} {}{}", name.bold(), color, marker.dimmed());
    }
}

fn roster_options(sheet: Option<String>, skip_rows: usize) -> RosterOptions {
    let mut options = RosterOptions::new().with_skip_rows(skip_rows);
    if let Some(name) = sheet {
        options = options.with_sheet(name);
    }
    options
}

/// First three characters of the roster file stem, the conventional
/// client prefix on output filenames.
fn roster_prefix(roster: &Path) -> String {
    let stem = roster.file_stem().unwrap_or_default().to_string_lossy();
    stem.chars().take(3).collect()
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb
}

fn print_report(input: &Path, output: &Path, outcome: &HighlightOutcome) {
    println!("{} {}", "Marked".green().bold(), input.display());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Output".bold(), output.display());
    println!("{}: {}", "Matches".bold(), outcome.total_matches);
    println!(
        "{}: {}",
        "Pages kept".bold(),
        outcome
            .kept_pages
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if !outcome.found.is_empty() {
        println!("{} ({})", "Found".green().bold(), outcome.found.len());
        for target in &outcome.found {
            println!("  {} {}", "✓".green(), target);
        }
    }
    if !outcome.not_found.is_empty() {
        println!("{} ({})", "Not found".red().bold(), outcome.not_found.len());
        for target in &outcome.not_found {
            println!("  {} {}", "✗".red(), target);
        }
    }
}
