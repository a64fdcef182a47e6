//! Skill extraction from plain text

use crate::error::Result;
use crate::extraction::tagger::{EntityLabel, EntityTagger};
use crate::extraction::vocabulary::SkillVocabulary;
use std::collections::BTreeSet;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Derives a deduplicated skill set from a text via two signals: exact
/// case-sensitive token membership in the vocabulary, and entity spans the
/// tagger labels as organization, product, or creative work (a proxy for
/// tool and technology mentions).
pub struct SkillExtractor {
    vocabulary: SkillVocabulary,
    tagger: Arc<dyn EntityTagger>,
}

impl SkillExtractor {
    pub fn new(vocabulary: SkillVocabulary, tagger: Arc<dyn EntityTagger>) -> Self {
        Self { vocabulary, tagger }
    }

    /// No stemming, no synonym expansion, no case folding. Multi-word
    /// vocabulary entries can only surface through the tagger path, since
    /// the token path compares single tokens.
    pub fn extract_skills(&self, text: &str) -> Result<BTreeSet<String>> {
        let mut skills = BTreeSet::new();

        for token in text.unicode_words() {
            if self.vocabulary.contains(token) {
                skills.insert(token.to_string());
            }
        }

        for span in self.tagger.tag(text)? {
            if matches!(
                span.label,
                EntityLabel::Organization | EntityLabel::Product | EntityLabel::CreativeWork
            ) {
                skills.insert(span.text);
            }
        }

        Ok(skills)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}
