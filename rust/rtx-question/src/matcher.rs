//! Mapping short phrases onto the node-label and edge-type vocabularies.
//!
//! Both matchers scan the whole vocabulary and keep the *last* entry that
//! matches. Callers depend on the resulting mapping, so the scan order is
//! part of the contract.

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::token::Normalizer;

/// Labels used when a phrase matches no vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelFallbacks {
    /// Label for phrases stemming to `gene`.
    pub protein_label: String,
    /// Label for phrases stemming to `condit`.
    pub disease_label: String,
}

impl Default for LabelFallbacks {
    fn default() -> Self {
        LabelFallbacks {
            protein_label: "uniprot_protein".into(),
            disease_label: "omim_disease".into(),
        }
    }
}

pub struct Matcher<'a> {
    lexicon: &'a Lexicon,
    normalizer: &'a Normalizer,
    fallbacks: &'a LabelFallbacks,
}

impl<'a> Matcher<'a> {
    pub fn new(
        lexicon: &'a Lexicon,
        normalizer: &'a Normalizer,
        fallbacks: &'a LabelFallbacks,
    ) -> Self {
        Matcher {
            lexicon,
            normalizer,
            fallbacks,
        }
    }

    /// Find the node label a phrase such as `"diseases"` refers to.
    ///
    /// The phrase is stemmed as a single word and tested for containment in
    /// each label, with underscores read as spaces.
    pub fn node_label(&self, phrase: &str) -> Option<String> {
        let query = self.normalizer.stem(phrase).to_lowercase();

        let mut found = None;
        for label in self.lexicon.node_labels() {
            if label.replace('_', " ").contains(&query) {
                found = Some(label.clone());
            }
        }

        found.or_else(|| match query.as_str() {
            "gene" => Some(self.fallbacks.protein_label.clone()),
            "condit" => Some(self.fallbacks.disease_label.clone()),
            _ => None,
        })
    }

    /// Find the edge type a phrase such as `"physically interacts with"`
    /// refers to. Only an exact match of the cleaned phrases counts.
    pub fn edge_type(&self, phrase: &str) -> Option<String> {
        let query = self.clean(&phrase.to_lowercase(), false);

        let mut found = None;
        for edge_type in self.lexicon.edge_types() {
            let candidate = self.clean(&edge_type.replace('_', " "), true);
            if candidate == query {
                found = Some(edge_type.clone());
            }
        }
        found
    }

    /// Drop stop words and stem the rest, space separated. Vocabulary
    /// entries abbreviate "associated" as `assoc`, which is expanded first.
    fn clean(&self, text: &str, expand_abbreviations: bool) -> String {
        self.normalizer
            .content_tokens(text)
            .iter()
            .map(|token| {
                let word = if expand_abbreviations && token.original == "assoc" {
                    "associated"
                } else {
                    token.original.as_str()
                };
                self.normalizer.stem(word)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
