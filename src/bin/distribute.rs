//! Compute the ACI distribution for one or more years from a CSV snapshot
//!
//! Usage: distribute --data-dir ./data/sample --year 2024 --format table

use aci_distribution::ledger::load_ledger;
use aci_distribution::settings::load_settings;
use aci_distribution::{DistributionEngine, DistributionResult};
use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "distribute", about = "Split the net ACI pool among practice associates")]
struct Args {
    /// Directory holding the CSV ledger snapshot
    #[arg(long)]
    data_dir: PathBuf,

    /// Fiscal year to distribute (repeatable, defaults to the current year)
    #[arg(long = "year")]
    years: Vec<i32>,

    /// key,value settings file (defaults to <data-dir>/settings.csv when present)
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Flat CSV row, one per associate per year
#[derive(Debug, Serialize)]
struct ShareRow<'a> {
    year: i32,
    associate_id: u32,
    name: &'a str,
    profession: &'a str,
    is_manager: bool,
    base_share: f64,
    rcp_share: f64,
    project_share: f64,
    total_share: f64,
    percentage_share: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let ledger = load_ledger(&args.data_dir)
        .with_context(|| format!("loading ledger from {}", args.data_dir.display()))?;

    let settings_path = args
        .settings
        .clone()
        .or_else(|| Some(args.data_dir.join("settings.csv")).filter(|p| p.exists()));
    let settings = match &settings_path {
        Some(path) => load_settings(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => BTreeMap::new(),
    };

    let years = if args.years.is_empty() {
        vec![Local::now().year()]
    } else {
        args.years.clone()
    };

    let engine = DistributionEngine::new(&ledger, &settings);
    let results = engine
        .compute_many(&years)
        .context("computing distribution")?;
    log::info!("Computed {} distribution(s) in {:?}", results.len(), start.elapsed());

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Table => write_table(&mut out, &results)?,
        OutputFormat::Csv => write_csv(&mut out, &results)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &results)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    Ok(())
}

fn write_table(out: &mut dyn Write, results: &[DistributionResult]) -> Result<()> {
    for result in results {
        writeln!(out, "Distribution {}", result.year)?;
        writeln!(out, "  ACI revenue:   {:>12.2}", result.total_aci_revenue)?;
        writeln!(out, "  Total revenue: {:>12.2}", result.total_revenue)?;
        writeln!(out, "  Expenses:      {:>12.2}", result.total_expenses)?;
        writeln!(out, "  Net pool:      {:>12.2}", result.net_amount)?;
        writeln!(
            out,
            "  Weights: fixed {:.2}, attendance {:.2}, project {:.2}, manager x{:.2}",
            result.settings.fixed_share_percentage,
            result.settings.rcp_share_percentage,
            result.settings.project_share_percentage,
            result.settings.manager_weight,
        )?;

        if result.is_empty() {
            writeln!(out, "  Nothing to distribute\n")?;
            continue;
        }

        writeln!(
            out,
            "\n{:<24} {:<16} {:>3} {:>12} {:>12} {:>12} {:>12} {:>8} {:>8} {:>5}",
            "Name", "Profession", "Mgr", "Base", "Attendance", "Project", "Total", "Pct", "Minutes", "Proj"
        )?;
        for share in &result.associate_shares {
            let minutes = result
                .rcp_attendance
                .get(&share.associate_id)
                .map(|b| b.minutes)
                .unwrap_or(0.0);
            let projects = result
                .project_contributions
                .get(&share.associate_id)
                .map(|b| b.project_count)
                .unwrap_or(0);
            writeln!(
                out,
                "{:<24} {:<16} {:>3} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>7.2}% {:>8.0} {:>5}",
                share.name,
                share.profession,
                if share.is_manager { "Y" } else { "" },
                share.base_share,
                share.rcp_share,
                share.project_share,
                share.total_share,
                share.percentage_share,
                minutes,
                projects,
            )?;
        }
        writeln!(out, "{:<24} {:>59.2}\n", "Distributed", result.total_distributed())?;
    }
    Ok(())
}

fn write_csv(out: &mut dyn Write, results: &[DistributionResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for result in results {
        for share in &result.associate_shares {
            wtr.serialize(ShareRow {
                year: result.year,
                associate_id: share.associate_id,
                name: &share.name,
                profession: &share.profession,
                is_manager: share.is_manager,
                base_share: share.base_share,
                rcp_share: share.rcp_share,
                project_share: share.project_share,
                total_share: share.total_share,
                percentage_share: share.percentage_share,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}
