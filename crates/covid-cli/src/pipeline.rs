//! Load-and-build session shared by the subcommands.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use covid_ingest::{
    Dataset, SourceCache, SourceClient, load_case_records, load_hospitalization_records,
};
use covid_model::{CaseSeries, HospSeries};
use covid_transform::{
    CaseSeriesBuilder, Clock, DailyCache, HospitalizationSeriesBuilder, SystemClock,
};

use crate::config::{Config, SourcesConfig};

/// Owns the source client and the per-day series caches.
///
/// The first request for a series on a given day loads and builds it; later
/// requests that day reuse the built series.
pub struct Session<C: Clock = SystemClock> {
    client: SourceClient,
    sources: SourcesConfig,
    clock: C,
    case_builder: CaseSeriesBuilder,
    hospitalization_builder: HospitalizationSeriesBuilder,
    cases: DailyCache<CaseSeries>,
    hospitalizations: DailyCache<HospSeries>,
}

impl Session<SystemClock> {
    /// Session for the configured sources. `no_cache` disables the on-disk
    /// source cache regardless of the configuration. Sessions that only read
    /// local files never open the cache.
    pub fn from_config(config: &Config, no_cache: bool) -> Result<Self> {
        let cache = if config.cache.enabled && !no_cache && config.sources.any_remote() {
            config.cache.resolved_dir().map(|dir| {
                debug!(dir = %dir.display(), "source cache enabled");
                SourceCache::new(dir)
            })
        } else {
            None
        };
        let client = SourceClient::new(cache).context("create HTTP client")?;
        Ok(Self::new(client, config.sources.clone(), SystemClock))
    }
}

impl<C: Clock> Session<C> {
    pub fn new(client: SourceClient, sources: SourcesConfig, clock: C) -> Self {
        Self {
            client,
            sources,
            clock,
            case_builder: CaseSeriesBuilder::new(),
            hospitalization_builder: HospitalizationSeriesBuilder::new(),
            cases: DailyCache::new("cases"),
            hospitalizations: DailyCache::new("hospitalizations"),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn case_series(&mut self) -> Result<&CaseSeries> {
        let today = self.clock.today();
        let client = &self.client;
        let source = &self.sources.cases;
        let builder = &self.case_builder;
        self.cases.get_or_try_insert_with(&self.clock, || {
            let span = info_span!("build", dataset = %Dataset::Cases);
            let _guard = span.enter();
            let start = Instant::now();
            let records = load_case_records(client, source, today)
                .with_context(|| format!("load cases from {source}"))?;
            let series = builder.build(&records).context("build case series")?;
            info!(
                records = records.len(),
                dates = series.len(),
                duration_ms = start.elapsed().as_millis(),
                "case series ready"
            );
            Ok(series)
        })
    }

    pub fn hospitalization_series(&mut self) -> Result<&HospSeries> {
        let today = self.clock.today();
        let client = &self.client;
        let source = &self.sources.hospitalizations;
        let builder = &self.hospitalization_builder;
        self.hospitalizations
            .get_or_try_insert_with(&self.clock, || {
                let span = info_span!("build", dataset = %Dataset::Hospitalizations);
                let _guard = span.enter();
                let start = Instant::now();
                let records = load_hospitalization_records(client, source, today)
                    .with_context(|| format!("load hospitalizations from {source}"))?;
                let series = builder
                    .build(&records)
                    .context("build hospitalization series")?;
                info!(
                    records = records.len(),
                    dates = series.len(),
                    duration_ms = start.elapsed().as_millis(),
                    "hospitalization series ready"
                );
                Ok(series)
            })
    }

    /// Both series, loading whichever is stale.
    pub fn series(&mut self) -> Result<(CaseSeries, HospSeries)> {
        let cases = self.case_series()?.clone();
        let hospitalizations = self.hospitalization_series()?.clone();
        Ok((cases, hospitalizations))
    }
}
