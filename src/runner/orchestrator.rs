use super::analyzer::PhotoAnalyzer;
use super::outcome::{IssueKind, LocationOutcome, LocationStatus, PipelinePhase};
use super::pipeline::LocationPipeline;
use crate::config::Config;
use crate::error::ConfigError;
use crate::output::{write_location, FolderNames, OutputLayout};
use crate::places::{PhotoFetch, PlaceSearch};
use crate::provider::VisionModel;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// The run stopped early because the vision model went away
#[derive(Debug, Clone, PartialEq)]
pub struct Halt {
    pub location: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct LocationResult {
    pub folder: String,
    pub outcome: LocationOutcome,
}

#[derive(Debug)]
pub struct RunReport {
    pub locations: Vec<LocationResult>,
    pub halted: Option<Halt>,
    pub total_duration: Duration,
}

impl RunReport {
    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for result in &self.locations {
            let outcome = &result.outcome;
            totals.locations += 1;
            *totals.by_status.entry(outcome.status).or_insert(0) += 1;
            totals.photos_downloaded += outcome.photos_downloaded;
            totals.photos_analyzed += outcome.photos_analyzed;
            totals.photos_selected += outcome.selection.len();
        }
        totals
    }
}

#[derive(Debug, Default, Clone, PartialEq, serde::Serialize)]
pub struct Totals {
    pub locations: usize,
    pub by_status: BTreeMap<LocationStatus, usize>,
    pub photos_downloaded: usize,
    pub photos_analyzed: usize,
    pub photos_selected: usize,
}

impl Totals {
    pub fn count(&self, status: LocationStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

pub struct Orchestrator {
    config: Config,
    search: Arc<dyn PlaceSearch>,
    fetch: Arc<dyn PhotoFetch>,
    analyzer: PhotoAnalyzer,
}

impl Orchestrator {
    pub fn new(
        config: Config,
        search: Arc<dyn PlaceSearch>,
        fetch: Arc<dyn PhotoFetch>,
        model: Arc<dyn VisionModel>,
    ) -> Result<Self, ConfigError> {
        let prompt = config.prompt_config()?;
        let analyzer = PhotoAnalyzer::new(model, prompt, config.model.malformed_retries);
        Ok(Self {
            config,
            search,
            fetch,
            analyzer,
        })
    }

    /// Process every location in input order, writing artifacts as each one
    /// finishes. Stops at the first location whose model became unavailable.
    pub async fn run(&self, locations: &[String], layout: &OutputLayout) -> RunReport {
        let start = Instant::now();
        let pipeline = LocationPipeline::new(
            &self.config,
            self.search.as_ref(),
            self.fetch.as_ref(),
            &self.analyzer,
        );

        info!(
            "Curating {} locations with {} and profile '{}' ({} categories)",
            locations.len(),
            self.analyzer.model_name(),
            self.analyzer.prompt().profile(),
            self.analyzer.prompt().categories().len()
        );

        let mut folders = FolderNames::default();
        let mut results = Vec::with_capacity(locations.len());
        let mut halted = None;

        for (i, location) in locations.iter().enumerate() {
            let folder = folders.assign(location);

            if halted.is_some() {
                results.push(LocationResult {
                    folder,
                    outcome: LocationOutcome::not_attempted(location),
                });
                continue;
            }

            info!("[{}/{}] {}", i + 1, locations.len(), location);
            let run = pipeline.run(location).await;

            if let Err(e) = write_location(layout, &folder, &run) {
                warn!(location = %location, "Failed to write artifacts: {}", e);
            }

            let elapsed = run.outcome.duration.as_secs_f64();
            match run.outcome.status.phase() {
                PipelinePhase::Failed => warn!(
                    location = %location,
                    status = %run.outcome.status,
                    "Failed after {:.1}s",
                    elapsed
                ),
                _ => info!(
                    location = %location,
                    status = %run.outcome.status,
                    selected = run.outcome.selection.len(),
                    "Finished in {:.1}s",
                    elapsed
                ),
            }

            if run.outcome.is_fatal() {
                let reason = run
                    .outcome
                    .issues
                    .iter()
                    .rev()
                    .find(|issue| issue.kind == IssueKind::ModelUnavailable)
                    .map(|issue| issue.message.clone())
                    .unwrap_or_else(|| "vision model unavailable".to_string());
                error!(location = %location, "Halting run: {}", reason);
                halted = Some(Halt {
                    location: location.clone(),
                    reason,
                });
            }

            results.push(LocationResult {
                folder,
                outcome: run.outcome,
            });
        }

        RunReport {
            locations: results,
            halted,
            total_duration: start.elapsed(),
        }
    }
}
