//! From free text to a restated question and its parameters.
//!
//! ```text
//! text → trim punctuation → select template (corpus ranking)
//!      → extract parameters (spans + labels) → restate
//! ```
//!
//! The [`Interpreter`] borrows the process-wide tables (lexicon, catalog)
//! and the two collaborators; it holds no mutable state, so repeated calls
//! with the same text give the same answer.

use tracing::debug;

use crate::catalog::QuestionCatalog;
use crate::config::DEFAULT_MIN_SIMILARITY;
use crate::error::QuestionError;
use crate::graph::KnowledgeGraph;
use crate::lexicon::Lexicon;
use crate::matcher::{LabelFallbacks, Matcher};
use crate::question::{Context, ParameterBinding};
use crate::similarity::CorpusRanker;
use crate::token::Normalizer;

/// The result of interpreting one question.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    /// Position of the chosen template in the catalog.
    pub template: usize,
    /// The chosen template's solution identifier.
    pub solution: String,
    /// Similarity score that selected the template.
    pub score: f64,
    /// `None` when the template's shape did not fit the text.
    pub parameters: Option<ParameterBinding>,
    pub restated: String,
}

pub struct Interpreter<'a> {
    lexicon: &'a Lexicon,
    catalog: &'a QuestionCatalog,
    graph: &'a dyn KnowledgeGraph,
    ranker: &'a dyn CorpusRanker,
    normalizer: Normalizer,
    fallbacks: LabelFallbacks,
    min_similarity: f64,
}

impl<'a> Interpreter<'a> {
    /// Templates scoring below [`DEFAULT_MIN_SIMILARITY`] are rejected until
    /// [`Interpreter::with_min_similarity`] says otherwise.
    pub fn new(
        lexicon: &'a Lexicon,
        catalog: &'a QuestionCatalog,
        graph: &'a dyn KnowledgeGraph,
        ranker: &'a dyn CorpusRanker,
    ) -> Self {
        Interpreter {
            lexicon,
            catalog,
            graph,
            ranker,
            normalizer: Normalizer::english(),
            fallbacks: LabelFallbacks::default(),
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }

    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: LabelFallbacks) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    pub fn context(&self) -> Context<'a> {
        Context::new(self.lexicon, self.graph)
    }

    /// Label and edge-type matching over this interpreter's lexicon.
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(self.lexicon, &self.normalizer, &self.fallbacks)
    }

    pub fn interpret(&self, text: &str) -> Result<Interpretation, QuestionError> {
        let text = text.trim().trim_matches(|c: char| c.is_ascii_punctuation());
        let selection = self.catalog.select(text, self.ranker, self.min_similarity)?;
        debug!(
            template = selection.index,
            score = selection.score,
            solution = selection.question.solution(),
            "selected question template"
        );

        let question = selection.question;
        let parameters = question.parameters(text, &self.context())?;
        let restated = match &parameters {
            Some(binding) => question.restate(binding, self.graph),
            None => question.restate(&ParameterBinding::new(), self.graph),
        };

        Ok(Interpretation {
            template: selection.index,
            solution: question.solution().to_string(),
            score: selection.score,
            parameters,
            restated,
        })
    }
}
