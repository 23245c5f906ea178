//! Diversity selection: one photo per content category first, then fill by score

use crate::contract::AnalysisRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;

/// An analyzed candidate, identified by its download sequence index
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub index: usize,
    pub analysis: AnalysisRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionOrigin {
    /// Best photo of a category not yet represented
    CategoryRepresentative,
    /// Picked by score once every category had its representative
    ScoreFill,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Selected {
    /// 1-based, in descending score order
    pub rank: usize,
    /// Candidate sequence index
    pub index: usize,
    pub origin: SelectionOrigin,
    pub analysis: AnalysisRecord,
}

/// Highest score first; the earlier download wins a tie
fn rank_key(candidate: &ScoredCandidate) -> (Reverse<u8>, usize) {
    (Reverse(candidate.analysis.quality_score), candidate.index)
}

/// Pick up to `count` photos that span distinct categories before filling by score.
///
/// Candidates with `represents_place == false` are dropped unless that would
/// leave nothing, in which case the whole pool is used. The result never
/// repeats a candidate and never exceeds `min(count, analyses.len())`.
pub fn select(analyses: &[ScoredCandidate], count: usize) -> Vec<Selected> {
    let representative: Vec<&ScoredCandidate> = analyses
        .iter()
        .filter(|c| c.analysis.represents_place)
        .collect();
    let mut pool = if representative.is_empty() {
        analyses.iter().collect()
    } else {
        representative
    };
    pool.sort_by_key(|c| rank_key(c));

    let mut picked: Vec<(&ScoredCandidate, SelectionOrigin)> = Vec::new();
    let mut chosen: HashSet<usize> = HashSet::new();

    // Walking the ranked pool, the first entry seen for a category is that
    // category's best, and categories are met in order of their best score.
    let mut covered: HashSet<&str> = HashSet::new();
    for candidate in &pool {
        if picked.len() >= count {
            break;
        }
        if chosen.contains(&candidate.index) {
            continue;
        }
        if covered.insert(candidate.analysis.category.as_str()) {
            chosen.insert(candidate.index);
            picked.push((candidate, SelectionOrigin::CategoryRepresentative));
        }
    }

    for candidate in &pool {
        if picked.len() >= count {
            break;
        }
        if chosen.insert(candidate.index) {
            picked.push((candidate, SelectionOrigin::ScoreFill));
        }
    }

    picked.sort_by_key(|(c, _)| rank_key(c));
    picked
        .into_iter()
        .enumerate()
        .map(|(i, (candidate, origin))| Selected {
            rank: i + 1,
            index: candidate.index,
            origin,
            analysis: candidate.analysis.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: usize, score: u8, category: &str, represents: bool) -> ScoredCandidate {
        ScoredCandidate {
            index,
            analysis: AnalysisRecord {
                quality_score: score,
                category: category.to_string(),
                description: format!("photo {}", index),
                represents_place: represents,
                reasoning: String::new(),
            },
        }
    }

    fn scores(selection: &[Selected]) -> Vec<u8> {
        selection.iter().map(|s| s.analysis.quality_score).collect()
    }

    #[test]
    fn test_one_per_category_then_ordered_by_score() {
        let analyses = vec![
            candidate(1, 8, "A", true),
            candidate(2, 6, "A", true),
            candidate(3, 9, "B", true),
            candidate(4, 7, "C", true),
        ];

        let selection = select(&analyses, 3);

        assert_eq!(scores(&selection), vec![9, 8, 7]);
        assert_eq!(
            selection.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![3, 1, 4]
        );
        assert!(selection
            .iter()
            .all(|s| s.origin == SelectionOrigin::CategoryRepresentative));
        assert_eq!(
            selection.iter().map(|s| s.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_single_category_fills_by_score() {
        let analyses = vec![
            candidate(1, 5, "trail", true),
            candidate(2, 9, "trail", true),
            candidate(3, 7, "trail", true),
            candidate(4, 8, "trail", true),
        ];

        let selection = select(&analyses, 3);

        assert_eq!(scores(&selection), vec![9, 8, 7]);
        assert_eq!(selection[0].origin, SelectionOrigin::CategoryRepresentative);
        assert_eq!(selection[1].origin, SelectionOrigin::ScoreFill);
        assert_eq!(selection[2].origin, SelectionOrigin::ScoreFill);
    }

    #[test]
    fn test_category_pass_prefers_breadth_over_score() {
        let analyses = vec![
            candidate(1, 10, "food", true),
            candidate(2, 9, "food", true),
            candidate(3, 4, "exterior", true),
        ];

        let selection = select(&analyses, 2);

        assert_eq!(
            selection.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_categories_visited_by_best_score() {
        // Three categories, two slots: the lowest-scoring category loses out
        let analyses = vec![
            candidate(1, 3, "signage", true),
            candidate(2, 8, "interior", true),
            candidate(3, 9, "exterior", true),
        ];

        let selection = select(&analyses, 2);

        assert_eq!(
            selection.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![3, 2]
        );
    }

    #[test]
    fn test_ties_broken_by_sequence_index() {
        let analyses = vec![
            candidate(4, 7, "A", true),
            candidate(2, 7, "A", true),
            candidate(3, 7, "B", true),
            candidate(1, 7, "B", true),
        ];

        let selection = select(&analyses, 3);

        // Category A is best-represented by index 2, B by index 1; B's best
        // was downloaded first so it is visited first. Fill takes index 3.
        assert_eq!(
            selection.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(selection[2].origin, SelectionOrigin::ScoreFill);
    }

    #[test]
    fn test_non_representative_filtered() {
        let analyses = vec![
            candidate(1, 10, "people", false),
            candidate(2, 6, "exterior", true),
            candidate(3, 5, "interior", true),
        ];

        let selection = select(&analyses, 3);

        assert_eq!(
            selection.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn test_all_filtered_falls_back_to_full_pool() {
        let flagged = vec![
            candidate(1, 4, "food", false),
            candidate(2, 8, "people", false),
            candidate(3, 6, "food", false),
            candidate(4, 2, "other", false),
        ];
        let unflagged: Vec<ScoredCandidate> = flagged
            .iter()
            .cloned()
            .map(|mut c| {
                c.analysis.represents_place = true;
                c
            })
            .collect();

        let strip = |s: Vec<Selected>| {
            s.into_iter()
                .map(|s| (s.rank, s.index, s.origin))
                .collect::<Vec<_>>()
        };

        assert_eq!(strip(select(&flagged, 3)), strip(select(&unflagged, 3)));
        assert_eq!(select(&flagged, 3).len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(select(&[], 3).is_empty());
    }

    #[test]
    fn test_zero_count() {
        let analyses = vec![candidate(1, 5, "A", true)];
        assert!(select(&analyses, 0).is_empty());
    }

    #[test]
    fn test_fewer_candidates_than_count() {
        let analyses = vec![candidate(1, 5, "A", true), candidate(2, 3, "A", true)];
        assert_eq!(select(&analyses, 5).len(), 2);
    }

    #[test]
    fn test_invariants_over_generated_sets() {
        // Small deterministic LCG so the sweep is reproducible
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: u64| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) % bound
        };
        let categories = ["A", "B", "C", "D"];

        for _ in 0..300 {
            let len = next(9) as usize;
            let analyses: Vec<ScoredCandidate> = (1..=len)
                .map(|index| {
                    candidate(
                        index,
                        next(10) as u8 + 1,
                        categories[next(4) as usize],
                        next(3) > 0,
                    )
                })
                .collect();
            let count = next(6) as usize;

            let selection = select(&analyses, count);

            assert!(selection.len() <= count.min(analyses.len()));
            if count > 0 {
                assert_eq!(selection.is_empty(), analyses.is_empty());
            }
            let unique: HashSet<usize> = selection.iter().map(|s| s.index).collect();
            assert_eq!(unique.len(), selection.len());
            assert!(selection
                .windows(2)
                .all(|w| w[0].analysis.quality_score >= w[1].analysis.quality_score));
            assert!(selection.iter().enumerate().all(|(i, s)| s.rank == i + 1));

            // Repeated runs agree
            assert_eq!(selection, select(&analyses, count));
        }
    }
}
