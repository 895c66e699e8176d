//! Error types for question interpretation.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by a [`KnowledgeGraph`](crate::graph::KnowledgeGraph).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("no node with id '{id}'")]
    NodeNotFound { id: String },

    #[error("node '{id}' has no property '{property}'")]
    MissingProperty { id: String, property: String },
}

#[derive(Debug, Error)]
pub enum QuestionError {
    /// More than one knowledge-graph node carries the label a parameter asks
    /// for. Aborts the whole extraction call.
    #[error("multiple candidate terms for parameter '{parameter}': {}", candidates.join(", "))]
    AmbiguousParameter {
        parameter: String,
        candidates: Vec<String>,
    },

    #[error("catalog line {line_number} could not be parsed ({reason}): {line:?}")]
    UnparseableCatalogLine {
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error("lexicon line {line_number} in {table} is malformed: {line:?}")]
    MalformedLexiconLine {
        table: &'static str,
        line_number: usize,
        line: String,
    },

    #[error("no question template matched (best score {best_score:.3}, threshold {threshold:.3})")]
    NoTemplateMatch { best_score: f64, threshold: f64 },

    #[error("question catalog is empty")]
    EmptyCatalog,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl QuestionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QuestionError::Io {
            path: path.into(),
            source,
        }
    }
}
