use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use covid_ingest::Dataset;
use covid_model::{CaseSeries, HospSeries};
use covid_transform::{Clock, case_frame, hospitalization_frame, write_frame_csv};

use crate::cli::{ExportArgs, ExportFormatArg, RowsArgs, SummaryArgs};
use crate::config::LoadedConfig;
use crate::pipeline::Session;
use crate::summary::{case_table, hospitalization_table, summarize, summary_table};

pub fn run_cases<C: Clock>(
    session: &mut Session<C>,
    config: &LoadedConfig,
    args: &RowsArgs,
) -> Result<()> {
    let rows = args.last.unwrap_or(config.config.display.rows);
    let series = session.case_series()?;
    println!("{}", case_table(series.tail(rows)));
    Ok(())
}

pub fn run_hospitalizations<C: Clock>(
    session: &mut Session<C>,
    config: &LoadedConfig,
    args: &RowsArgs,
) -> Result<()> {
    let rows = args.last.unwrap_or(config.config.display.rows);
    let series = session.hospitalization_series()?;
    println!("{}", hospitalization_table(series.tail(rows)));
    Ok(())
}

pub fn run_summary<C: Clock>(
    session: &mut Session<C>,
    config: &LoadedConfig,
    args: &SummaryArgs,
) -> Result<()> {
    let window = args.window.unwrap_or(config.config.display.window_days);
    let (cases, hospitalizations) = session.series()?;
    let metrics = summarize(&cases, &hospitalizations, window);
    for metric in &metrics {
        info!("{}", metric.line());
    }
    println!("{}", summary_table(&metrics));
    if let Some(change) = cases.latest().and_then(|day| day.ten_day_percent_change) {
        println!("10-day change in positive tests: {change:+.1}%");
    }
    Ok(())
}

pub fn run_export<C: Clock>(
    session: &mut Session<C>,
    args: &ExportArgs,
) -> Result<Vec<PathBuf>> {
    let (cases, hospitalizations) = session.series()?;
    export_series(&cases, &hospitalizations, &args.out, args.format)
}

/// Write both series into `out`, one file each, named after the dataset.
pub fn export_series(
    cases: &CaseSeries,
    hospitalizations: &HospSeries,
    out: &Path,
    format: ExportFormatArg,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out).with_context(|| format!("create {}", out.display()))?;
    let extension = match format {
        ExportFormatArg::Csv => "csv",
        ExportFormatArg::Json => "json",
    };
    let case_path = out.join(format!("{}.{extension}", Dataset::Cases.name()));
    let hosp_path = out.join(format!("{}.{extension}", Dataset::Hospitalizations.name()));

    match format {
        ExportFormatArg::Csv => {
            let mut frame = case_frame(cases).context("build case frame")?;
            write_frame_csv(&mut frame, &case_path)
                .with_context(|| format!("write {}", case_path.display()))?;
            let mut frame =
                hospitalization_frame(hospitalizations).context("build hospitalization frame")?;
            write_frame_csv(&mut frame, &hosp_path)
                .with_context(|| format!("write {}", hosp_path.display()))?;
        }
        ExportFormatArg::Json => {
            write_json(cases, &case_path)?;
            write_json(hospitalizations, &hosp_path)?;
        }
    }
    Ok(vec![case_path, hosp_path])
}

fn write_json<T: serde::Serialize>(value: &T, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize series")?;
    fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote json");
    Ok(())
}

pub fn run_config(config: &LoadedConfig) -> Result<()> {
    match (&config.path, config.from_file) {
        (Some(path), true) => println!("# {}", path.display()),
        (Some(path), false) => println!("# {} (not found, showing defaults)", path.display()),
        (None, _) => println!("# no config directory, showing defaults"),
    }
    print!("{}", config.config.to_toml()?);
    Ok(())
}
