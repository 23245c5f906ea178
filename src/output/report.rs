use super::layout::{file_safe, OutputLayout};
use crate::error::OutputError;
use crate::runner::{LocationOutcome, LocationRun};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct AnalysisReport<'a> {
    folder: &'a str,
    #[serde(flatten)]
    outcome: &'a LocationOutcome,
}

/// Write one location's analysis report, downloads and curated picks.
///
/// The report goes first so a failure while copying photos never loses it.
/// The curated folder is rebuilt from scratch so stale picks from an earlier
/// run never linger next to the new ones.
pub fn write_location(
    layout: &OutputLayout,
    folder: &str,
    run: &LocationRun,
) -> Result<(), OutputError> {
    fs::create_dir_all(layout.reports_dir()).map_err(OutputError::CreateDir)?;
    let report = AnalysisReport {
        folder,
        outcome: &run.outcome,
    };
    let json = serde_json::to_string_pretty(&report)?;
    write_file(&layout.analysis_path(folder), json.as_bytes())?;

    if !run.candidates.is_empty() {
        let downloads = layout.downloads_dir(folder);
        fs::create_dir_all(&downloads).map_err(OutputError::CreateDir)?;
        for candidate in &run.candidates {
            write_file(&downloads.join(candidate.file_name()), &candidate.image)?;
        }
    }

    let curated = layout.curated_dir(folder);
    if curated.exists() {
        fs::remove_dir_all(&curated).map_err(|source| OutputError::Write {
            path: curated.clone(),
            source,
        })?;
    }
    if !run.outcome.selection.is_empty() {
        fs::create_dir_all(&curated).map_err(OutputError::CreateDir)?;
        for pick in &run.outcome.selection {
            let Some(candidate) = run.candidates.iter().find(|c| c.index == pick.index) else {
                continue;
            };
            write_file(
                &curated.join(curated_file_name(pick.rank, &pick.analysis.category)),
                &candidate.image,
            )?;
        }
    }

    Ok(())
}

pub fn curated_file_name(rank: usize, category: &str) -> String {
    format!("{:02}_{}.jpg", rank, file_safe(category))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), OutputError> {
    fs::write(path, bytes).map_err(|source| OutputError::Write {
        path: PathBuf::from(path),
        source,
    })
}
