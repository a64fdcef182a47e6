//! Coarse domain classification from entity tags

use crate::error::Result;
use crate::extraction::tagger::{EntityLabel, EntityTagger};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Structured summary of a text's inferred professional context, used as a
/// coarse relevance gate. Both sets are always present, empty when nothing
/// was extracted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainProfile {
    pub job_titles: BTreeSet<String>,
    pub education: BTreeSet<String>,
}

impl DomainProfile {
    /// Exact string-set intersection on either field; no fuzzy matching.
    pub fn overlaps(&self, other: &DomainProfile) -> bool {
        self.job_titles.intersection(&other.job_titles).next().is_some()
            || self.education.intersection(&other.education).next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.job_titles.is_empty() && self.education.is_empty()
    }
}

pub struct DomainClassifier {
    tagger: Arc<dyn EntityTagger>,
}

impl DomainClassifier {
    pub fn new(tagger: Arc<dyn EntityTagger>) -> Self {
        Self { tagger }
    }

    /// Person and organization spans feed `job_titles`; education and degree
    /// spans feed `education`. Taggers that never produce education labels
    /// leave that field empty, which keeps the education half of the domain
    /// gate inert. Spans are recorded verbatim, unnormalized.
    pub fn classify_domain(&self, text: &str) -> Result<DomainProfile> {
        let mut profile = DomainProfile::default();

        for span in self.tagger.tag(text)? {
            match span.label {
                EntityLabel::Person | EntityLabel::Organization => {
                    profile.job_titles.insert(span.text);
                }
                EntityLabel::Education | EntityLabel::Degree => {
                    profile.education.insert(span.text);
                }
                _ => {}
            }
        }

        Ok(profile)
    }
}
