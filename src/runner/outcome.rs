use super::select::Selected;
use crate::config::LatLng;
use crate::contract::AnalysisRecord;
use crate::places::PlaceRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One downloaded, normalized photo
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Position of the photo reference, starting at 1
    pub index: usize,
    pub photo_ref: String,
    pub digest: String,
    pub image: Vec<u8>,
}

impl Candidate {
    pub fn file_name(&self) -> String {
        download_file_name(self.index)
    }
}

pub fn download_file_name(index: usize) -> String {
    format!("photo_{:02}.jpg", index)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    Done,
    Failed,
    NotAttempted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    /// At least one photo selected
    Curated,
    /// Resolved, but nothing could be downloaded
    NoPhotos,
    /// Photos downloaded, none survived analysis
    AnalysisFailed,
    /// The search returned no place. Counted in the `Failed` phase, though the
    /// location still finishes normally with an empty selection and the run
    /// carries on
    NotFound,
    SearchFailed,
    /// The vision model went away mid-location; the run stopped here
    ModelUnavailable,
    /// Never reached because the run stopped earlier
    NotAttempted,
}

impl LocationStatus {
    pub fn phase(&self) -> PipelinePhase {
        match self {
            LocationStatus::Curated | LocationStatus::NoPhotos | LocationStatus::AnalysisFailed => {
                PipelinePhase::Done
            }
            LocationStatus::NotFound
            | LocationStatus::SearchFailed
            | LocationStatus::ModelUnavailable => PipelinePhase::Failed,
            LocationStatus::NotAttempted => PipelinePhase::NotAttempted,
        }
    }
}

impl std::fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LocationStatus::Curated => "curated",
            LocationStatus::NoPhotos => "no_photos",
            LocationStatus::AnalysisFailed => "analysis_failed",
            LocationStatus::NotFound => "not_found",
            LocationStatus::SearchFailed => "search_failed",
            LocationStatus::ModelUnavailable => "model_unavailable",
            LocationStatus::NotAttempted => "not_attempted",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    NotFound,
    SearchFailed,
    DetailsFailed,
    DownloadFailed,
    DuplicatePhoto,
    MalformedResponse,
    Rejected,
    ModelUnavailable,
}

/// A problem recorded against a location; only `ModelUnavailable` is fatal
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLng>,
}

impl From<&PlaceRecord> for PlaceSummary {
    fn from(place: &PlaceRecord) -> Self {
        Self {
            place_id: place.place_id.clone(),
            name: place.name.clone(),
            address: place.address.clone(),
            location: place.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CandidateSummary {
    pub index: usize,
    pub file: String,
    pub photo_ref: String,
    pub digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationOutcome {
    pub location: String,
    pub status: LocationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<PlaceSummary>,
    pub photos_available: usize,
    pub photos_downloaded: usize,
    pub photos_analyzed: usize,
    pub analysis_failures: usize,
    pub candidates: Vec<CandidateSummary>,
    pub selection: Vec<Selected>,
    pub issues: Vec<Issue>,
    /// Wall time; kept out of the persisted report so it stays diffable
    #[serde(skip)]
    pub duration: Duration,
}

impl LocationOutcome {
    pub fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
            status: LocationStatus::NotAttempted,
            place: None,
            photos_available: 0,
            photos_downloaded: 0,
            photos_analyzed: 0,
            analysis_failures: 0,
            candidates: Vec::new(),
            selection: Vec::new(),
            issues: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn not_attempted(location: &str) -> Self {
        Self::new(location)
    }

    pub fn record(&mut self, kind: IssueKind, candidate: Option<usize>, message: impl Into<String>) {
        self.issues.push(Issue {
            kind,
            candidate,
            message: message.into(),
        });
    }

    pub fn is_fatal(&self) -> bool {
        self.status == LocationStatus::ModelUnavailable
    }
}

/// Everything the pipeline produced for one location
#[derive(Debug)]
pub struct LocationRun {
    pub outcome: LocationOutcome,
    pub candidates: Vec<Candidate>,
}
