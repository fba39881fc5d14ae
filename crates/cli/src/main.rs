use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;

use extrato_classify::CategoryEngine;
use extrato_core::{Category, DateRangeFilter};
use extrato_ingest::{IngestionResult, Ingestor};
use extrato_report::{group_by_month, summarize, top_categories, CategorySummary, MonthlySummary, Summary};

/// Uploads larger than this are rejected before any bytes are parsed.
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Summarize a Nubank or Inter CSV export: totals, category breakdown and
/// monthly trend.
#[derive(Parser)]
#[command(name = "extrato", version)]
struct Cli {
    /// Path to the exported .csv file.
    file: PathBuf,

    /// Keep only transactions on or after this date (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Keep only transactions on or before this date (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// How many categories to show in the breakdown.
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// TOML file with extra keywords to register on top of the built-in
    /// table, e.g. `Alimentacao = ["my diner"]`.
    #[arg(long)]
    keywords: Option<PathBuf>,

    /// Emit the raw artifacts as JSON instead of formatted tables.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    summary: Summary,
    categories: Vec<CategorySummary>,
    months: Vec<MonthlySummary>,
    errors: Vec<String>,
    skipped_rows: usize,
    total_rows: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    validate_file(&cli.file)?;
    let csv_text = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    tracing::debug!(bytes = csv_text.len(), file = %cli.file.display(), "read export file");

    let mut engine = CategoryEngine::new();
    if let Some(path) = &cli.keywords {
        register_extra_keywords(&mut engine, path)?;
    }

    let result = Ingestor::new(&engine)
        .ingest_with_progress(&csv_text, |percent| {
            eprint!("\rProcessing... {percent:>3.0}%");
            let _ = std::io::stderr().flush();
        })
        .context("ingestion failed")?;
    eprintln!();

    let filter = DateRangeFilter::new(cli.from, cli.to);
    let transactions = extrato_report::filter_by_date_range(&result.transactions, filter);

    let report = Report {
        summary: summarize(&transactions),
        categories: top_categories(&transactions, cli.top),
        months: group_by_month(&transactions),
        errors: result.errors.clone(),
        skipped_rows: result.skipped_rows,
        total_rows: result.total_rows,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &result);
    }

    Ok(())
}

/// The checks the acquisition surface performs before the core sees bytes:
/// a .csv extension, a size cap, and a non-empty payload.
fn validate_file(path: &Path) -> Result<()> {
    if path.extension().and_then(|e| e.to_str()) != Some("csv") {
        bail!("{} is not a .csv file", path.display());
    }
    let metadata = fs::metadata(path)
        .with_context(|| format!("cannot access {}", path.display()))?;
    if metadata.len() == 0 {
        bail!("{} is empty", path.display());
    }
    if metadata.len() > MAX_FILE_SIZE {
        bail!(
            "{} is larger than the {} MiB limit",
            path.display(),
            MAX_FILE_SIZE / (1024 * 1024)
        );
    }
    Ok(())
}

fn register_extra_keywords(engine: &mut CategoryEngine, path: &Path) -> Result<()> {
    let doc = fs::read_to_string(path)
        .with_context(|| format!("failed to read keyword file {}", path.display()))?;
    let extra: BTreeMap<Category, Vec<String>> =
        toml::from_str(&doc).context("malformed keyword file")?;
    for (category, keywords) in extra {
        for keyword in keywords {
            engine.register_keyword(category, &keyword);
        }
    }
    Ok(())
}

fn money(value: rust_decimal::Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn print_report(report: &Report, ingestion: &IngestionResult) {
    let s = &report.summary;
    println!("Transactions  {}", s.transaction_count);
    if let (Some(start), Some(end)) = (s.start, s.end) {
        println!("Period        {start} to {end}");
    }
    println!("Income        R$ {:>12}", money(s.total_income));
    println!("Expense       R$ {:>12}", money(s.total_expense));
    println!("Balance       R$ {:>12}", money(s.net_balance));

    if !report.categories.is_empty() {
        println!("\nTop categories (expenses)");
        for c in &report.categories {
            println!(
                "  {:<15} R$ {:>12}  {:>5.1}%  ({} txns)",
                c.category.to_string(),
                money(c.amount),
                c.percentage,
                c.transaction_count
            );
        }
    }

    if !report.months.is_empty() {
        println!("\nMonthly trend");
        println!("  {:<8} {:>14} {:>14} {:>14}", "month", "income", "expense", "balance");
        for m in &report.months {
            println!(
                "  {:<8} {:>14} {:>14} {:>14}",
                m.month,
                money(m.income),
                money(m.expense),
                money(m.balance)
            );
        }
    }

    if ingestion.skipped_rows > 0 {
        println!(
            "\nSkipped {} of {} rows",
            ingestion.skipped_rows, ingestion.total_rows
        );
        for error in &ingestion.errors {
            println!("  {error}");
        }
    }
}
