//! # RTX question interpretation
//!
//! Matches a natural-language biomedical question against a catalog of
//! question templates and pulls the template's parameters out of the text by
//! finding knowledge-graph entities named in it.
//!
//! ## Pipeline
//!
//! ```text
//! text → QuestionCatalog::select (CorpusRanker over each template's corpus)
//!      → Question::parameters
//!          "what is X"   → X, verbatim
//!          labeled slots → spans → Lexicon::lookup → KnowledgeGraph labels
//!      → Question::restate (node descriptions substituted into the template)
//! ```
//!
//! The lexicon and catalog are loaded once and shared by reference. The
//! knowledge graph and the corpus ranker are traits; [`graph::MemoryGraph`]
//! and [`similarity::TokenOverlapRanker`] are the in-process implementations.
//!
//! ## Example
//!
//! ```
//! use rtx_question::{Context, Lexicon, MemoryGraph, Question};
//!
//! let lexicon = Lexicon::new()
//!     .with_name("DOID:12365", "malaria")
//!     .with_name("DOID:14325", "mixed malaria");
//! let graph = MemoryGraph::new()
//!     .with_node("DOID:12365", "disont_disease", "malaria")
//!     .with_node("DOID:14325", "disont_disease", "mixed malaria");
//! let question = Question::new(
//!     "What genetic conditions might offer protection against $disont_disease?",
//!     vec!["what genetic conditions protect against malaria".into()],
//!     serde_json::json!(["disont_disease"]),
//!     "Q1",
//! );
//!
//! let context = Context::new(&lexicon, &graph);
//! let binding = question
//!     .parameters("what genetic conditions might protect against mixed malaria?", &context)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(binding.get("disont_disease"), Some("DOID:14325"));
//! assert_eq!(
//!     question.restate(&binding, &graph),
//!     "What genetic conditions might offer protection against mixed malaria?"
//! );
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod interpret;
pub mod lexicon;
pub mod matcher;
pub mod question;
pub mod similarity;
pub mod span;
pub mod template;
pub mod token;
mod tsv;

pub use catalog::{QuestionCatalog, Selection};
pub use config::Config;
pub use error::{GraphError, QuestionError};
pub use graph::{KnowledgeGraph, MemoryGraph};
pub use interpret::{Interpretation, Interpreter};
pub use lexicon::Lexicon;
pub use matcher::{LabelFallbacks, Matcher};
pub use question::{Context, ExtractionMode, ParameterBinding, Question};
pub use similarity::{CorpusMatch, CorpusRanker, TokenOverlapRanker};
pub use token::Normalizer;
