//! Named-entity tagging over plain text
//!
//! The pipeline only depends on the `EntityTagger` contract: label spans of a
//! text with a coarse category. The shipped implementation is a lexicon
//! tagger; model-backed taggers can be substituted behind the same trait.

use crate::config::LexiconConfig;
use crate::error::{Result, ResumeRankerError};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Organization,
    Product,
    CreativeWork,
    Education,
    Degree,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

pub trait EntityTagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<EntitySpan>>;
}

/// Gazetteer-driven tagger: case-sensitive leftmost-longest matching of
/// known surface forms, with word-boundary checks so "AWS" does not fire
/// inside "LAWS". Surface forms are recorded verbatim, unnormalized.
pub struct LexiconTagger {
    matcher: AhoCorasick,
    labels: Vec<EntityLabel>,
}

impl LexiconTagger {
    pub fn new(lexicon: &LexiconConfig) -> Result<Self> {
        let mut patterns: Vec<&str> = Vec::new();
        let mut labels = Vec::new();

        let groups: [(&[String], EntityLabel); 6] = [
            (&lexicon.persons, EntityLabel::Person),
            (&lexicon.organizations, EntityLabel::Organization),
            (&lexicon.products, EntityLabel::Product),
            (&lexicon.creative_works, EntityLabel::CreativeWork),
            (&lexicon.education, EntityLabel::Education),
            (&lexicon.degrees, EntityLabel::Degree),
        ];

        for (terms, label) in groups {
            for term in terms {
                patterns.push(term.as_str());
                labels.push(label);
            }
        }

        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| ResumeRankerError::Tagging(format!("Failed to build lexicon tagger: {}", e)))?;

        Ok(Self { matcher, labels })
    }

    fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
        let bytes = text.as_bytes();
        let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        before_ok && after_ok
    }
}

impl EntityTagger for LexiconTagger {
    fn tag(&self, text: &str) -> Result<Vec<EntitySpan>> {
        let mut spans = Vec::new();

        for mat in self.matcher.find_iter(text) {
            if !Self::is_word_bounded(text, mat.start(), mat.end()) {
                continue;
            }

            spans.push(EntitySpan {
                text: text[mat.start()..mat.end()].to_string(),
                label: self.labels[mat.pattern().as_usize()],
                start: mat.start(),
                end: mat.end(),
            });
        }

        Ok(spans)
    }
}
