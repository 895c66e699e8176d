//! Candidate-span extraction: finding knowledge-graph entities named in text.
//!
//! Every contiguous run of tokens ("span") is tried against the
//! [`Lexicon`]. Longer spans are tried first, and a span that is a substring
//! of an already accepted span is skipped, so `"mixed malaria"` claims the
//! phrase before `"malaria"` gets a chance to.
//!
//! Span order is an artifact of how spans are enumerated: lengths `1` up to
//! `token_count - 1`, each length left to right, and the whole list then
//! reversed. Within one length the scan therefore runs right to left, and a
//! span covering every token is never tried.

use indexmap::IndexSet;
use tracing::trace;

use crate::error::QuestionError;
use crate::graph::KnowledgeGraph;
use crate::lexicon::Lexicon;
use crate::token::{Token, tokenize};

/// A node named in the text, together with its label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub node: String,
    pub label: String,
}

/// Build every candidate span of `tokens` in lookup order.
pub fn candidate_spans(tokens: &[Token]) -> Vec<String> {
    let mut spans = Vec::new();
    for size in 1..tokens.len() {
        for window in tokens.windows(size) {
            let span = window
                .iter()
                .map(|t| t.original.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            spans.push(span);
        }
    }
    spans.reverse();
    spans
}

/// Find the node names mentioned in `text`, in acceptance order, without
/// duplicates.
pub fn find_node_names<'l>(text: &str, lexicon: &'l Lexicon) -> Vec<&'l str> {
    let tokens = tokenize(text);
    let mut accepted: Vec<String> = Vec::new();
    let mut names: IndexSet<&'l str> = IndexSet::new();

    for span in candidate_spans(&tokens) {
        let found = lexicon.lookup(&span);
        if found.is_empty() {
            continue;
        }
        if accepted.iter().any(|claimed| claimed.contains(span.as_str())) {
            continue;
        }
        trace!(span = %span, nodes = ?found, "accepted span");
        names.extend(found);
        accepted.push(span);
    }

    names.into_iter().collect()
}

/// Find the nodes mentioned in `text` and fetch each one's label.
///
/// A label lookup failure aborts the extraction.
pub fn extract_candidates(
    text: &str,
    lexicon: &Lexicon,
    graph: &dyn KnowledgeGraph,
) -> Result<IndexSet<Candidate>, QuestionError> {
    let mut candidates = IndexSet::new();
    for node in find_node_names(text, lexicon) {
        let label = graph.node_label(node)?;
        candidates.insert(Candidate {
            node: node.to_string(),
            label,
        });
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test]
    fn spans_run_longest_first_and_right_to_left() {
        let tokens = tokenize("a b c d");
        assert_eq!(
            candidate_spans(&tokens),
            vec!["b c d", "a b c", "c d", "b c", "a b", "d", "c", "b", "a"]
        );
    }

    #[test]
    fn single_token_has_no_spans() {
        assert!(candidate_spans(&tokenize("malaria")).is_empty());
        assert!(candidate_spans(&[]).is_empty());
    }

    #[test]
    fn longer_phrase_claims_its_substrings() {
        let lexicon = Lexicon::new()
            .with_name("DOID:12365", "malaria")
            .with_name("DOID:14325", "mixed malaria");
        let names = find_node_names(
            "what genetic conditions might protect against mixed malaria?",
            &lexicon,
        );
        assert_eq!(names, vec!["DOID:14325"]);
    }

    #[test]
    fn shorter_phrase_alone_still_matches() {
        let lexicon = Lexicon::new()
            .with_name("DOID:12365", "malaria")
            .with_name("DOID:14325", "mixed malaria");
        let names = find_node_names("what protects against malaria?", &lexicon);
        assert_eq!(names, vec!["DOID:12365"]);
    }

    #[test]
    fn ambiguous_names_yield_every_node() {
        let lexicon = Lexicon::new()
            .with_name("DOID:1", "tumor")
            .with_name("OMIM:1", "tumor");
        let names = find_node_names("what about tumor now", &lexicon);
        assert_eq!(names, vec!["DOID:1", "OMIM:1"]);
    }

    #[test]
    fn empty_text_has_no_candidates() -> TestResult {
        let lexicon = Lexicon::new().with_name("DOID:1", "tumor");
        let graph = MemoryGraph::new();
        assert!(extract_candidates("", &lexicon, &graph)?.is_empty());
        Ok(())
    }

    #[test]
    fn candidates_carry_labels() -> TestResult {
        let lexicon = Lexicon::new().with_name("DOID:4960", "bone marrow cancer");
        let graph = MemoryGraph::new().with_node("DOID:4960", "disont_disease", "bone marrow cancer");
        let candidates = extract_candidates("what treats bone marrow cancer?", &lexicon, &graph)?;
        assert_eq!(
            candidates.into_iter().collect::<Vec<_>>(),
            vec![Candidate {
                node: "DOID:4960".into(),
                label: "disont_disease".into()
            }]
        );
        Ok(())
    }

    #[test]
    fn missing_label_is_an_error() {
        let lexicon = Lexicon::new().with_name("DOID:1", "tumor");
        let graph = MemoryGraph::new();
        let result = extract_candidates("what about tumor now", &lexicon, &graph);
        assert!(matches!(result, Err(QuestionError::Graph(_))));
    }
}
