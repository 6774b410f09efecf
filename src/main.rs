//! cutplan - CLI to generate BOM reports from a project snapshot file.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cutplan::report::{csv, text};
use cutplan::{
    get_cut_list, get_jamb_kit_list, get_pick_list, get_purchasing_summary,
    get_stock_optimization, CutListFilter, ProjectSnapshot, ResolutionFailure,
};

/// Which report to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Report {
    /// Purchasing totals by part number
    Summary,
    /// Cut list grouped by product and size
    CutList,
    /// Stock packing plans with waste
    Optimize,
    /// Warehouse pick list
    PickList,
    /// Per-opening jamb kits
    JambKit,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Csv,
    Json,
}

/// Generate purchasing, cut-list, and stock-optimization reports from a
/// project snapshot.
#[derive(Parser, Debug)]
#[command(name = "cutplan")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project snapshot JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Report to generate
    #[arg(short, long, value_enum, default_value = "summary")]
    report: Report,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Restrict the cut list to one product id
    #[arg(long)]
    product: Option<String>,

    /// Restrict the cut list to one size key
    #[arg(long)]
    size: Option<String>,

    /// Scale the cut list to a partial production run of this many units
    #[arg(long)]
    batch: Option<u32>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Processing: {}", args.input.display());

    let snapshot = ProjectSnapshot::load(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    info!(
        "Loaded project '{}': {} products, {} openings",
        snapshot.project_id,
        snapshot.products.len(),
        snapshot.openings.len()
    );

    let rendered = render(&args, &snapshot)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn render(args: &Args, snapshot: &ProjectSnapshot) -> Result<String> {
    let output = match args.report {
        Report::Summary => {
            let report = get_purchasing_summary(snapshot);
            warn_errors(&report.errors);
            match args.format {
                Format::Text => text::summary_text(&report),
                Format::Csv => csv::summary_csv(&report)?,
                Format::Json => serde_json::to_string_pretty(&report)?,
            }
        }
        Report::CutList => {
            let filter = CutListFilter {
                product: args.product.clone(),
                size_key: args.size.clone(),
                batch_size: args.batch,
            };
            let report = get_cut_list(snapshot, &filter);
            warn_errors(&report.errors);
            match args.format {
                Format::Text => text::cut_list_text(&report),
                Format::Csv => csv::cut_list_csv(&report)?,
                Format::Json => serde_json::to_string_pretty(&report)?,
            }
        }
        Report::Optimize => {
            let report = get_stock_optimization(snapshot);
            warn_errors(&report.errors);
            match args.format {
                Format::Text => text::stock_plans_text(&report.plans),
                Format::Csv => csv::stock_plans_csv(&report.plans)?,
                Format::Json => serde_json::to_string_pretty(&report)?,
            }
        }
        Report::PickList => {
            let report = get_pick_list(snapshot);
            warn_errors(&report.errors);
            match args.format {
                Format::Text => text::pick_list_text(&report),
                Format::Csv => csv::pick_list_csv(&report)?,
                Format::Json => serde_json::to_string_pretty(&report)?,
            }
        }
        Report::JambKit => {
            let report = get_jamb_kit_list(snapshot);
            warn_errors(&report.errors);
            match args.format {
                Format::Text => text::jamb_kit_text(&report),
                Format::Csv => csv::jamb_kit_csv(&report)?,
                Format::Json => serde_json::to_string_pretty(&report)?,
            }
        }
    };

    Ok(output)
}

fn warn_errors(errors: &[ResolutionFailure]) {
    for failure in errors {
        warn!(
            "{} [{}]: {}",
            failure.opening, failure.part_number, failure.error
        );
    }
}
