//! Embedding generation and semantic similarity scoring

use crate::config::Config;
use crate::error::{Result, ResumeRankerError};
use log::info;
use model2vec_rs::model::StaticModel;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Batch text encoder producing one fixed-dimension vector per input text.
/// All vectors from one encoder instance live in the same space and are
/// directly comparable. Implementations must be safe for concurrent
/// read-only use.
pub trait TextEncoder: Send + Sync {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Model2Vec-backed encoder. Model weights load once at construction and
/// the handle is shared read-only for the process lifetime.
pub struct EmbeddingEngine {
    model: StaticModel,
    model_name: String,
}

impl EmbeddingEngine {
    pub async fn from_config(config: &Config) -> Result<Self> {
        let model_ref = Self::resolve_model_ref(config);
        let start_time = Instant::now();

        info!("Loading embedding model: {}", model_ref.display());
        let model = StaticModel::from_pretrained(&model_ref, None, None, None)
            .map_err(|e| ResumeRankerError::ModelLoading(format!("Failed to load embedding model: {}", e)))?;
        info!("Embedding model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: config.models.embedding_model.clone(),
        })
    }

    /// Prefer a local copy under the models dir, fall back to treating the
    /// configured name as a HuggingFace repo ID.
    fn resolve_model_ref(config: &Config) -> PathBuf {
        let local_path = config.models_dir().join(&config.models.embedding_model);
        if local_path.exists() {
            local_path
        } else {
            PathBuf::from(&config.models.embedding_model)
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl TextEncoder for EmbeddingEngine {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(self.model.encode(texts))
    }
}

/// Cosine similarity between two vectors of equal dimension. Zero-norm
/// inputs (e.g. the embedding of an empty text) score 0.0 rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(ResumeRankerError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}

/// Scores a batch of candidate texts against a query text. The query and all
/// candidates go through the encoder as one batch, so model overhead is paid
/// once per request rather than once per document.
pub struct SimilarityScorer {
    encoder: Arc<dyn TextEncoder>,
}

impl SimilarityScorer {
    pub fn new(encoder: Arc<dyn TextEncoder>) -> Self {
        Self { encoder }
    }

    /// Returns one similarity per candidate, index-aligned with the input.
    /// Inputs are never mutated or reordered. Encoder failures are fatal for
    /// the request: there is no fallback similarity computation.
    pub fn score(&self, query_text: &str, candidate_texts: &[String]) -> Result<Vec<f32>> {
        let mut batch = Vec::with_capacity(candidate_texts.len() + 1);
        batch.push(query_text.to_string());
        batch.extend(candidate_texts.iter().cloned());

        let embeddings = self.encoder.encode(&batch)?;
        if embeddings.len() != batch.len() {
            return Err(ResumeRankerError::Embedding(format!(
                "Encoder returned {} vectors for {} texts",
                embeddings.len(),
                batch.len()
            )));
        }

        let (query_embedding, candidate_embeddings) = embeddings
            .split_first()
            .ok_or_else(|| ResumeRankerError::Embedding("Encoder returned no vectors".to_string()))?;

        candidate_embeddings
            .iter()
            .map(|candidate| cosine_similarity(query_embedding, candidate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic encoder: each vector slot accumulates one count per
    /// word, keyed by word length. Unnormalized; cosine handles scale.
    struct WordSlotEncoder;

    impl TextEncoder for WordSlotEncoder {
        fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|text| {
                    let mut v = vec![0.0f32; 4];
                    for word in text.split_whitespace() {
                        let slot = word.len() % 4;
                        v[slot] += 1.0;
                    }
                    v
                })
                .collect())
        }
    }

    struct FailingEncoder;

    impl TextEncoder for FailingEncoder {
        fn encode(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(ResumeRankerError::Embedding("backend unavailable".to_string()))
        }
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let v = vec![0.5, 1.0, -0.25];
        let score = cosine_similarity(&v, &v).unwrap();
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let score = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(score.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_dimension_mismatch_is_error() {
        let result = cosine_similarity(&[1.0, 2.0], &[1.0]);
        assert!(matches!(result, Err(ResumeRankerError::Embedding(_))));
    }

    #[test]
    fn test_cosine_zero_vector_scores_zero() {
        let score = cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_scorer_returns_one_score_per_candidate() {
        let scorer = SimilarityScorer::new(Arc::new(WordSlotEncoder));
        let candidates = vec![
            "alpha beta".to_string(),
            "gamma".to_string(),
            "".to_string(),
        ];

        let scores = scorer.score("alpha beta", &candidates).unwrap();
        assert_eq!(scores.len(), 3);
    }

    #[test]
    fn test_scorer_self_similarity_is_maximal() {
        let scorer = SimilarityScorer::new(Arc::new(WordSlotEncoder));
        let scores = scorer
            .score("python developer", &["python developer".to_string()])
            .unwrap();

        assert!(scores[0] >= 0.99);
    }

    #[test]
    fn test_scorer_preserves_candidate_order() {
        let scorer = SimilarityScorer::new(Arc::new(WordSlotEncoder));
        let candidates = vec![
            "zz".to_string(),
            "python developer".to_string(),
            "q".to_string(),
        ];

        let scores = scorer.score("python developer", &candidates).unwrap();
        // The exact-match candidate sits at index 1 and must stay there.
        assert!(scores[1] >= 0.99);
        assert!(scores[1] >= scores[0]);
        assert!(scores[1] >= scores[2]);
    }

    #[test]
    fn test_scorer_empty_candidate_list() {
        let scorer = SimilarityScorer::new(Arc::new(WordSlotEncoder));
        let scores = scorer.score("query", &[]).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn test_encoder_failure_propagates() {
        let scorer = SimilarityScorer::new(Arc::new(FailingEncoder));
        let result = scorer.score("query", &["candidate".to_string()]);
        assert!(matches!(result, Err(ResumeRankerError::Embedding(_))));
    }
}
