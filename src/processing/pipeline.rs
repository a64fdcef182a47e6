//! Ranking engine joining ingestion, extraction, scoring, and ranking

use crate::config::Config;
use crate::error::Result;
use crate::extraction::domain::DomainClassifier;
use crate::extraction::skills::SkillExtractor;
use crate::extraction::tagger::{EntityTagger, LexiconTagger};
use crate::extraction::vocabulary::SkillVocabulary;
use crate::input::manager::{Document, DocumentIngestor};
use crate::processing::embeddings::{EmbeddingEngine, SimilarityScorer, TextEncoder};
use crate::processing::ranker::{CandidateRecord, DomainGatedRanker, RankedCandidate};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Result of one ranking request: candidates ordered by ascending rank, plus
/// the skills required by the job description itself (never domain-gated).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub ranked: Vec<RankedCandidate>,
    pub required_skills: BTreeSet<String>,
}

/// The single join point of the pipeline. Owns the shared model handles;
/// construct once at process start and reuse across requests. All request
/// handling goes through `&self` so concurrent callers only ever read.
pub struct RankingEngine {
    ingestor: DocumentIngestor,
    skill_extractor: SkillExtractor,
    domain_classifier: DomainClassifier,
    scorer: SimilarityScorer,
    ranker: DomainGatedRanker,
}

impl RankingEngine {
    /// Load the embedding model and build the lexicon tagger from
    /// configuration. Model-weight loading is the expensive step; it happens
    /// exactly once here.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let encoder: Arc<dyn TextEncoder> = Arc::new(EmbeddingEngine::from_config(config).await?);
        let tagger: Arc<dyn EntityTagger> = Arc::new(LexiconTagger::new(&config.vocabulary.lexicon)?);
        let vocabulary = SkillVocabulary::new(config.vocabulary.skills.iter().cloned());

        Ok(Self::with_components(
            encoder,
            tagger,
            vocabulary,
            config.scoring.unmatched_domain_floor,
        ))
    }

    /// Assemble an engine from injected components. This is the substitution
    /// seam: tests pass deterministic encoders and minimal vocabularies.
    pub fn with_components(
        encoder: Arc<dyn TextEncoder>,
        tagger: Arc<dyn EntityTagger>,
        vocabulary: SkillVocabulary,
        unmatched_floor: f32,
    ) -> Self {
        Self {
            ingestor: DocumentIngestor::new(),
            skill_extractor: SkillExtractor::new(vocabulary, Arc::clone(&tagger)),
            domain_classifier: DomainClassifier::new(tagger),
            scorer: SimilarityScorer::new(encoder),
            ranker: DomainGatedRanker::new(unmatched_floor),
        }
    }

    /// Process one ranking request. Per-document failures degrade to empty
    /// text and stay isolated; encoder failures abort the whole request.
    pub fn rank_documents(
        &self,
        job_description: &str,
        documents: &[Document],
    ) -> Result<RankingOutcome> {
        info!("Ranking {} documents against job description", documents.len());

        let required_skills = self.skill_extractor.extract_skills(job_description)?;
        let query_domain = self.domain_classifier.classify_domain(job_description)?;
        debug!(
            "Query: {} required skills, {} domain entities",
            required_skills.len(),
            query_domain.job_titles.len() + query_domain.education.len()
        );

        let mut candidate_texts = Vec::with_capacity(documents.len());
        let mut records = Vec::with_capacity(documents.len());

        for document in documents {
            let outcome = self.ingestor.ingest(document);
            let text = outcome.text().to_string();

            let skills = self.skill_extractor.extract_skills(&text)?;
            let domain_profile = self.domain_classifier.classify_domain(&text)?;
            debug!(
                "{}: {} chars extracted, {} skills",
                document.filename,
                text.len(),
                skills.len()
            );

            records.push(CandidateRecord {
                filename: document.filename.clone(),
                extracted_text: text.clone(),
                extraction_failure: outcome.failure().map(|r| r.to_string()),
                skills,
                domain_profile,
            });
            candidate_texts.push(text);
        }

        let similarities = self.scorer.score(job_description, &candidate_texts)?;
        let ranked = self.ranker.rank(&query_domain, records, &similarities)?;

        Ok(RankingOutcome {
            ranked,
            required_skills,
        })
    }
}
