//! Domain-gated ranking of scored candidates

use crate::error::{Result, ResumeRankerError};
use crate::extraction::domain::DomainProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A candidate with its per-document features, ready to be joined with its
/// similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub filename: String,
    pub extracted_text: String,
    pub extraction_failure: Option<String>,
    pub skills: BTreeSet<String>,
    pub domain_profile: DomainProfile,
}

/// Final ranking entry. `rank` is derived from sorted position, never set
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub filename: String,
    pub final_score: f32,
    pub extracted_text: String,
    pub extraction_failure: Option<String>,
    pub skills: BTreeSet<String>,
    pub domain_profile: DomainProfile,
}

/// Merges similarity scores with domain-profile overlap. Semantic similarity
/// alone can rank an unrelated-but-buzzword-compatible resume highly; the
/// domain gate trusts coarse entity overlap over embedding similarity
/// whenever the two disagree.
pub struct DomainGatedRanker {
    unmatched_floor: f32,
}

impl DomainGatedRanker {
    pub fn new(unmatched_floor: f32) -> Self {
        Self { unmatched_floor }
    }

    /// Candidates whose domain profile shares no job title and no education
    /// entry with the query's are floored to a fixed near-zero score (never
    /// literally zero, so sorting stays well-defined). Sorting is stable:
    /// ties keep their input order. Ranks are contiguous and 1-based.
    pub fn rank(
        &self,
        query_domain: &DomainProfile,
        candidates: Vec<CandidateRecord>,
        similarities: &[f32],
    ) -> Result<Vec<RankedCandidate>> {
        if candidates.len() != similarities.len() {
            return Err(ResumeRankerError::Ranking(format!(
                "{} candidates but {} similarity scores",
                candidates.len(),
                similarities.len()
            )));
        }

        let mut scored: Vec<(f32, CandidateRecord)> = candidates
            .into_iter()
            .zip(similarities.iter())
            .map(|(candidate, &similarity)| {
                let final_score = if candidate.domain_profile.overlaps(query_domain) {
                    similarity.clamp(0.0, 1.0)
                } else {
                    self.unmatched_floor
                };
                (final_score, candidate)
            })
            .collect();

        // slice::sort_by is a stable sort; total_cmp keeps the comparison total.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(position, (final_score, candidate))| RankedCandidate {
                rank: position + 1,
                filename: candidate.filename,
                final_score,
                extracted_text: candidate.extracted_text,
                extraction_failure: candidate.extraction_failure,
                skills: candidate.skills,
                domain_profile: candidate.domain_profile,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(job_titles: &[&str]) -> DomainProfile {
        DomainProfile {
            job_titles: job_titles.iter().map(|s| s.to_string()).collect(),
            education: BTreeSet::new(),
        }
    }

    fn candidate(filename: &str, job_titles: &[&str]) -> CandidateRecord {
        CandidateRecord {
            filename: filename.to_string(),
            extracted_text: String::new(),
            extraction_failure: None,
            skills: BTreeSet::new(),
            domain_profile: profile(job_titles),
        }
    }

    #[test]
    fn test_unmatched_candidates_get_exact_floor() {
        let ranker = DomainGatedRanker::new(0.01);
        let query = profile(&["Amazon"]);
        let candidates = vec![candidate("a.pdf", &["Google"])];

        let ranked = ranker.rank(&query, candidates, &[0.95]).unwrap();
        assert_eq!(ranked[0].final_score, 0.01);
    }

    #[test]
    fn test_matched_candidates_keep_similarity() {
        let ranker = DomainGatedRanker::new(0.01);
        let query = profile(&["Amazon"]);
        let candidates = vec![candidate("a.pdf", &["Amazon"])];

        let ranked = ranker.rank(&query, candidates, &[0.62]).unwrap();
        assert_eq!(ranked[0].final_score, 0.62);
    }

    #[test]
    fn test_scores_clamp_into_unit_interval() {
        let ranker = DomainGatedRanker::new(0.01);
        let query = profile(&["Amazon"]);
        let candidates = vec![
            candidate("high.pdf", &["Amazon"]),
            candidate("low.pdf", &["Amazon"]),
        ];

        let ranked = ranker.rank(&query, candidates, &[1.0000002, -0.3]).unwrap();
        assert_eq!(ranked[0].final_score, 1.0);
        assert_eq!(ranked[1].final_score, 0.0);
    }

    #[test]
    fn test_ranks_are_contiguous_and_score_ordered() {
        let ranker = DomainGatedRanker::new(0.01);
        let query = profile(&["Amazon"]);
        let candidates = vec![
            candidate("c.pdf", &["Amazon"]),
            candidate("a.pdf", &["Amazon"]),
            candidate("b.pdf", &[]),
        ];

        let ranked = ranker.rank(&query, candidates, &[0.40, 0.90, 0.99]).unwrap();

        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(ranked[0].filename, "a.pdf");
        assert_eq!(ranked[1].filename, "c.pdf");
        assert_eq!(ranked[2].filename, "b.pdf");
        assert!(ranked.windows(2).all(|w| w[0].final_score >= w[1].final_score));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranker = DomainGatedRanker::new(0.01);
        let query = profile(&[]);
        // No candidate can match an empty query profile: all tie at the floor.
        let candidates = vec![
            candidate("first.pdf", &["Amazon"]),
            candidate("second.pdf", &["Google"]),
            candidate("third.pdf", &[]),
        ];

        let ranked = ranker.rank(&query, candidates, &[0.1, 0.9, 0.5]).unwrap();

        assert_eq!(ranked[0].filename, "first.pdf");
        assert_eq!(ranked[1].filename, "second.pdf");
        assert_eq!(ranked[2].filename, "third.pdf");
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let ranker = DomainGatedRanker::new(0.01);
        let result = ranker.rank(&profile(&[]), vec![candidate("a.pdf", &[])], &[]);
        assert!(matches!(result, Err(ResumeRankerError::Ranking(_))));
    }

    #[test]
    fn test_empty_batch_ranks_empty() {
        let ranker = DomainGatedRanker::new(0.01);
        let ranked = ranker.rank(&profile(&[]), Vec::new(), &[]).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_education_overlap_opens_the_gate() {
        let ranker = DomainGatedRanker::new(0.01);
        let query = DomainProfile {
            job_titles: BTreeSet::new(),
            education: ["BSc Computer Science".to_string()].into_iter().collect(),
        };
        let mut record = candidate("a.pdf", &[]);
        record.domain_profile.education.insert("BSc Computer Science".to_string());

        let ranked = ranker.rank(&query, vec![record], &[0.8]).unwrap();
        assert_eq!(ranked[0].final_score, 0.8);
    }
}
