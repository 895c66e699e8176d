//! Ranking corpora by similarity to an input question.
//!
//! Template selection is delegated to a [`CorpusRanker`]: given the input and
//! the example corpus of every template, it names the best corpus and how
//! well it matched. [`TokenOverlapRanker`] is the built-in ranker; anything
//! smarter (embeddings, WordNet distances) plugs in behind the same trait.

use std::collections::HashSet;

use crate::token::Normalizer;

/// The winning corpus and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorpusMatch {
    pub index: usize,
    pub score: f64,
}

pub trait CorpusRanker {
    /// Pick the corpus most similar to `text`, or `None` when there is
    /// nothing to rank.
    fn find_best_corpus(&self, text: &str, corpora: &[&[String]]) -> Option<CorpusMatch>;
}

/// Scores a sentence by the Jaccard overlap of its stemmed content words
/// with the input; a corpus scores as its best sentence. Ties go to the
/// earlier corpus.
#[derive(Debug, Default)]
pub struct TokenOverlapRanker {
    normalizer: Normalizer,
}

impl TokenOverlapRanker {
    pub fn new(normalizer: Normalizer) -> Self {
        TokenOverlapRanker { normalizer }
    }

    fn stems(&self, text: &str) -> HashSet<String> {
        self.normalizer
            .content_tokens(&text.to_lowercase())
            .iter()
            .filter(|token| !token.is_punctuation())
            .map(|token| self.normalizer.stem(&token.original))
            .collect()
    }

    /// Similarity of two texts in `[0, 1]`.
    pub fn similarity(&self, left: &str, right: &str) -> f64 {
        jaccard(&self.stems(left), &self.stems(right))
    }
}

fn jaccard(left: &HashSet<String>, right: &HashSet<String>) -> f64 {
    let union = left.union(right).count();
    if union == 0 {
        return 0.0;
    }
    left.intersection(right).count() as f64 / union as f64
}

impl CorpusRanker for TokenOverlapRanker {
    fn find_best_corpus(&self, text: &str, corpora: &[&[String]]) -> Option<CorpusMatch> {
        let input = self.stems(text);
        let mut best: Option<CorpusMatch> = None;

        for (index, corpus) in corpora.iter().enumerate() {
            let score = corpus
                .iter()
                .map(|sentence| jaccard(&input, &self.stems(sentence)))
                .fold(0.0, f64::max);
            if best.is_none_or(|b| score > b.score) {
                best = Some(CorpusMatch { index, score });
            }
        }

        best
    }
}
