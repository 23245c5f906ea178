use super::layout::OutputLayout;
use crate::error::OutputError;
use crate::runner::{LocationStatus, RunReport, Totals};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Run aggregate written to `reports/summary.json`.
///
/// Holds no timestamps or durations so two runs over the same inputs
/// produce identical files.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub locations: Vec<LocationSummary>,
    pub totals: Totals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halted: Option<HaltSummary>,
}

#[derive(Debug, Serialize)]
pub struct LocationSummary {
    pub location: String,
    pub folder: String,
    pub status: LocationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    pub photos_available: usize,
    pub photos_downloaded: usize,
    pub photos_analyzed: usize,
    pub analysis_failures: usize,
    pub picks: Vec<PickSummary>,
}

#[derive(Debug, Serialize)]
pub struct PickSummary {
    pub rank: usize,
    pub file: String,
    pub category: String,
    pub quality_score: u8,
}

#[derive(Debug, Serialize)]
pub struct HaltSummary {
    pub location: String,
    pub reason: String,
}

pub fn build_summary(report: &RunReport) -> SummaryReport {
    let locations = report
        .locations
        .iter()
        .map(|result| {
            let outcome = &result.outcome;
            LocationSummary {
                location: outcome.location.clone(),
                folder: result.folder.clone(),
                status: outcome.status,
                matched: outcome.place.as_ref().map(|p| p.name.clone()),
                photos_available: outcome.photos_available,
                photos_downloaded: outcome.photos_downloaded,
                photos_analyzed: outcome.photos_analyzed,
                analysis_failures: outcome.analysis_failures,
                picks: outcome
                    .selection
                    .iter()
                    .map(|s| PickSummary {
                        rank: s.rank,
                        file: super::curated_file_name(s.rank, &s.analysis.category),
                        category: s.analysis.category.clone(),
                        quality_score: s.analysis.quality_score,
                    })
                    .collect(),
            }
        })
        .collect();

    SummaryReport {
        locations,
        totals: report.totals(),
        halted: report.halted.as_ref().map(|h| HaltSummary {
            location: h.location.clone(),
            reason: h.reason.clone(),
        }),
    }
}

/// Write `summary.json` and `summary.md`; returns the markdown path
pub fn write_summary(layout: &OutputLayout, report: &RunReport) -> Result<PathBuf, OutputError> {
    let report_dir = layout.reports_dir();
    fs::create_dir_all(&report_dir).map_err(OutputError::CreateDir)?;

    let summary = build_summary(report);

    let json_path = report_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(&json_path, json).map_err(|source| OutputError::Write {
        path: json_path.clone(),
        source,
    })?;

    let md_path = report_dir.join("summary.md");
    let md = build_summary_markdown(&summary, report.total_duration.as_secs_f64());
    fs::write(&md_path, md).map_err(|source| OutputError::Write {
        path: md_path.clone(),
        source,
    })?;

    Ok(md_path)
}

fn build_summary_markdown(summary: &SummaryReport, duration_sec: f64) -> String {
    let mut md = String::new();
    let totals = &summary.totals;

    md.push_str("# Location Curator Summary\n\n");
    md.push_str(&format!("**Generated:** {}\n", Utc::now().to_rfc3339()));
    md.push_str(&format!("**Duration:** {:.1}s\n", duration_sec));
    if let Some(halt) = &summary.halted {
        md.push_str(&format!(
            "**Halted at:** {} ({})\n",
            halt.location, halt.reason
        ));
    }
    md.push('\n');

    md.push_str("## Totals\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Locations | {} |\n", totals.locations));
    for (status, count) in &totals.by_status {
        md.push_str(&format!("| {} | {} |\n", status, count));
    }
    md.push_str(&format!(
        "| Photos downloaded | {} |\n",
        totals.photos_downloaded
    ));
    md.push_str(&format!("| Photos analyzed | {} |\n", totals.photos_analyzed));
    md.push_str(&format!("| Photos selected | {} |\n\n", totals.photos_selected));

    md.push_str("## Locations\n\n");
    md.push_str("| Location | Status | Downloaded | Analyzed | Selected |\n");
    md.push_str("|----------|--------|------------|----------|----------|\n");
    for location in &summary.locations {
        md.push_str(&format!(
            "| {} | {} {} | {} | {} | {} |\n",
            location.location,
            status_icon(location.status),
            location.status,
            location.photos_downloaded,
            location.photos_analyzed,
            location.picks.len()
        ));
    }

    let curated: Vec<_> = summary
        .locations
        .iter()
        .filter(|l| !l.picks.is_empty())
        .collect();
    if !curated.is_empty() {
        md.push_str("\n## Picks\n\n");
        for location in curated {
            md.push_str(&format!("### {}\n\n", location.location));
            for pick in &location.picks {
                md.push_str(&format!(
                    "- `curated/{}/{}` ({}/10)\n",
                    location.folder, pick.file, pick.quality_score
                ));
            }
            md.push('\n');
        }
    }

    md
}

fn status_icon(status: LocationStatus) -> &'static str {
    match status {
        LocationStatus::Curated => "✅",
        LocationStatus::NoPhotos | LocationStatus::AnalysisFailed => "⚠️",
        LocationStatus::NotFound | LocationStatus::SearchFailed => "❌",
        LocationStatus::ModelUnavailable => "🛑",
        LocationStatus::NotAttempted => "⏭️",
    }
}
