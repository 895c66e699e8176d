//! Tokenization and word normalization.
//!
//! Questions are split into word and punctuation tokens the way a treebank
//! word tokenizer does it: whitespace separates words, and punctuation
//! hanging off either end of a word becomes its own token, so that
//! `"malaria?"` yields `malaria` and `?`. Punctuation inside a word
//! (`creutzfeldt-jakob`, `alzheimer's`, `DOID:1234`) stays put.
//!
//! [`Normalizer`] bundles the English Snowball stemmer and the English
//! stop-word list used by the label/edge matchers and the corpus ranker.

use std::collections::HashSet;
use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};

/// A single token extracted from input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The text as written, case preserved.
    pub original: String,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Number,
    Punctuation,
}

impl Token {
    fn new(original: &str) -> Self {
        let kind = if original.chars().all(|c| c.is_ascii_punctuation()) {
            TokenKind::Punctuation
        } else if original
            .chars()
            .all(|c| c.is_numeric() || c == '.' || c == ',')
        {
            TokenKind::Number
        } else {
            TokenKind::Word
        };
        Token {
            original: original.to_string(),
            kind,
        }
    }

    pub fn is_punctuation(&self) -> bool {
        self.kind == TokenKind::Punctuation
    }
}

/// Tokenize input text into a sequence of tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut pieces: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        let core_start = word
            .char_indices()
            .find(|(_, c)| !c.is_ascii_punctuation())
            .map(|(i, _)| i);

        let Some(core_start) = core_start else {
            // All punctuation: one token per character.
            pieces.extend(split_chars(word));
            continue;
        };

        // A non-punctuation char exists, so the reverse scan finds one.
        let core_end = word
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_ascii_punctuation())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(word.len());

        pieces.extend(split_chars(&word[..core_start]));
        pieces.push(&word[core_start..core_end]);
        pieces.extend(split_chars(&word[core_end..]));
    }

    pieces.into_iter().map(Token::new).collect()
}

fn split_chars(s: &str) -> impl Iterator<Item = &str> {
    s.char_indices().map(move |(i, c)| &s[i..i + c.len_utf8()])
}

/// English stop words, lowercase.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Stemmer plus stop-word set.
pub struct Normalizer {
    stemmer: Stemmer,
    stop_words: HashSet<&'static str>,
}

impl Normalizer {
    pub fn english() -> Self {
        Normalizer {
            stemmer: Stemmer::create(Algorithm::English),
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Stem a word. The word is lowercased first.
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(&word.to_lowercase()).into_owned()
    }

    /// Stop-word membership is case sensitive, like the word list itself.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Tokenize `text` and drop stop words, returning the remaining tokens.
    pub fn content_tokens(&self, text: &str) -> Vec<Token> {
        tokenize(text)
            .into_iter()
            .filter(|token| !self.is_stop_word(&token.original))
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::english()
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("algorithm", &"english")
            .field("stop_words", &self.stop_words.len())
            .finish()
    }
}
