//! Per-location workflow: resolve, acquire, analyze, select

use super::analyzer::PhotoAnalyzer;
use super::outcome::{
    Candidate, CandidateSummary, IssueKind, LocationOutcome, LocationRun, LocationStatus,
    PlaceSummary,
};
use super::retry::retry_with_backoff;
use super::select::{select, ScoredCandidate};
use crate::config::Config;
use crate::error::AnalysisError;
use crate::imaging;
use crate::places::{PhotoFetch, PlaceQuery, PlaceRecord, PlaceSearch};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct LocationPipeline<'a> {
    config: &'a Config,
    search: &'a dyn PlaceSearch,
    fetch: &'a dyn PhotoFetch,
    analyzer: &'a PhotoAnalyzer,
}

impl<'a> LocationPipeline<'a> {
    pub fn new(
        config: &'a Config,
        search: &'a dyn PlaceSearch,
        fetch: &'a dyn PhotoFetch,
        analyzer: &'a PhotoAnalyzer,
    ) -> Self {
        Self {
            config,
            search,
            fetch,
            analyzer,
        }
    }

    /// Always yields an outcome; a fatal model failure is reported through
    /// [`LocationOutcome::is_fatal`] rather than an error.
    pub async fn run(&self, location: &str) -> LocationRun {
        let start = Instant::now();
        let mut outcome = LocationOutcome::new(location);

        let candidates = match self.resolve(location, &mut outcome).await {
            Some(place) => {
                let candidates = self.acquire(location, &place, &mut outcome).await;
                self.analyze_and_select(location, &candidates, &mut outcome)
                    .await;
                candidates
            }
            None => Vec::new(),
        };

        outcome.duration = start.elapsed();
        LocationRun {
            outcome,
            candidates,
        }
    }

    async fn resolve(&self, location: &str, outcome: &mut LocationOutcome) -> Option<PlaceRecord> {
        let query = PlaceQuery::new(location, &self.config.bias);
        let search = self.search;
        let query_ref = &query;

        let matches = match retry_with_backoff(
            &self.config.retry,
            |e: &crate::error::PlacesError| e.is_transient(),
            move || search.search(query_ref),
        )
        .await
        {
            Ok(matches) => matches,
            Err(e) => {
                warn!(location, "Place search failed: {}", e);
                outcome.record(IssueKind::SearchFailed, None, e.to_string());
                outcome.status = LocationStatus::SearchFailed;
                return None;
            }
        };

        // The provider's first match is authoritative
        let Some(best) = matches.into_iter().next() else {
            info!(location, "No place matched");
            outcome.record(
                IssueKind::NotFound,
                None,
                format!("no place matched '{}'", query.text()),
            );
            outcome.status = LocationStatus::NotFound;
            return None;
        };
        info!(location, matched = %best.name, "Resolved place");

        let place = match self.search.details(&best).await {
            Ok(place) => place,
            Err(e) => {
                warn!(location, "Place details failed: {}", e);
                outcome.record(IssueKind::DetailsFailed, None, e.to_string());
                PlaceRecord::from_match(&best)
            }
        };

        outcome.place = Some(PlaceSummary::from(&place));
        outcome.photos_available = place.photo_refs.len();
        Some(place)
    }

    async fn acquire(
        &self,
        location: &str,
        place: &PlaceRecord,
        outcome: &mut LocationOutcome,
    ) -> Vec<Candidate> {
        let refs: Vec<&String> = place
            .photo_refs
            .iter()
            .take(self.config.max_candidates)
            .collect();
        debug!(location, "Downloading {} photos", refs.len());

        let mut candidates = Vec::new();
        let mut seen_digests = HashSet::new();

        for (i, photo_ref) in refs.into_iter().enumerate() {
            let index = i + 1;

            if photo_ref.is_empty() {
                warn!(location, index, "Photo entry has no reference");
                outcome.record(
                    IssueKind::DownloadFailed,
                    Some(index),
                    "photo entry has no reference",
                );
                continue;
            }

            let normalized = match self.fetch.fetch(photo_ref, self.config.max_dimension).await {
                Ok(raw) => imaging::normalize(&raw, self.config.max_dimension)
                    .map(|image| (imaging::digest(&raw), image)),
                Err(e) => Err(e),
            };

            match normalized {
                Ok((digest, image)) => {
                    if !seen_digests.insert(digest.clone()) {
                        debug!(location, index, "Skipping duplicate photo");
                        outcome.record(
                            IssueKind::DuplicatePhoto,
                            Some(index),
                            format!("identical to an earlier download ({})", digest),
                        );
                        continue;
                    }
                    candidates.push(Candidate {
                        index,
                        photo_ref: photo_ref.clone(),
                        digest,
                        image,
                    });
                }
                Err(e) => {
                    warn!(location, index, "Download failed: {}", e);
                    outcome.record(IssueKind::DownloadFailed, Some(index), e.to_string());
                }
            }
        }

        outcome.photos_downloaded = candidates.len();
        info!(location, "{} photos downloaded", candidates.len());
        candidates
    }

    async fn analyze_and_select(
        &self,
        location: &str,
        candidates: &[Candidate],
        outcome: &mut LocationOutcome,
    ) {
        if candidates.is_empty() {
            outcome.status = LocationStatus::NoPhotos;
            return;
        }

        let total = candidates.len();
        let mut scored = Vec::new();

        for (n, candidate) in candidates.iter().enumerate() {
            let mut summary = CandidateSummary {
                index: candidate.index,
                file: candidate.file_name(),
                photo_ref: candidate.photo_ref.clone(),
                digest: candidate.digest.clone(),
                analysis: None,
                error: None,
            };

            match self.analyzer.analyze(&candidate.image, location).await {
                Ok(record) => {
                    info!(
                        location,
                        "[{}/{}] {}: score={}, {}",
                        n + 1,
                        total,
                        summary.file,
                        record.quality_score,
                        record.category
                    );
                    summary.analysis = Some(record.clone());
                    scored.push(ScoredCandidate {
                        index: candidate.index,
                        analysis: record,
                    });
                }
                Err(e) => {
                    warn!(location, "[{}/{}] {}: {}", n + 1, total, summary.file, e);
                    summary.error = Some(e.to_string());
                    outcome.analysis_failures += 1;

                    let kind = match &e {
                        AnalysisError::MalformedResponse { .. } => IssueKind::MalformedResponse,
                        AnalysisError::Rejected(_) => IssueKind::Rejected,
                        AnalysisError::ModelUnavailable(_) => IssueKind::ModelUnavailable,
                    };
                    outcome.record(kind, Some(candidate.index), e.to_string());

                    if e.is_fatal() {
                        outcome.candidates.push(summary);
                        outcome.photos_analyzed = scored.len();
                        outcome.status = LocationStatus::ModelUnavailable;
                        return;
                    }
                }
            }
            outcome.candidates.push(summary);
        }

        outcome.photos_analyzed = scored.len();
        outcome.selection = select(&scored, self.config.select_count);
        outcome.status = if outcome.selection.is_empty() {
            LocationStatus::AnalysisFailed
        } else {
            LocationStatus::Curated
        };

        for pick in &outcome.selection {
            info!(
                location,
                "Selected #{}: {} (score {}/10, {:?})",
                pick.rank,
                pick.analysis.category,
                pick.analysis.quality_score,
                pick.origin
            );
        }
    }
}
