//! Question templates: one parseable kind of question each.
//!
//! A [`Question`] pairs a restatement template (`"What genetic conditions
//! might offer protection against $disont_disease?"`) with a corpus of
//! example sentences, an opaque solution identifier naming the downstream
//! handler, and the slot names parsed out of the template.
//!
//! Parameters are extracted in one of two modes, fixed at construction:
//!
//! - [`ExtractionMode::Term`]: the template has the single slot `term`; the
//!   question is a "what is X" question and X is taken verbatim.
//! - [`ExtractionMode::Nodes`]: every slot is named after a node label, and
//!   is filled with the single node of that label mentioned in the text.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::QuestionError;
use crate::graph::{DESCRIPTION, KnowledgeGraph};
use crate::lexicon::Lexicon;
use crate::span::extract_candidates;
use crate::template::SlotTemplate;

/// The slot name that selects [`ExtractionMode::Term`].
pub const TERM_SLOT: &str = "term";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    Term,
    Nodes,
}

/// Everything parameter extraction and restatement read from.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub lexicon: &'a Lexicon,
    pub graph: &'a dyn KnowledgeGraph,
}

impl<'a> Context<'a> {
    pub fn new(lexicon: &'a Lexicon, graph: &'a dyn KnowledgeGraph) -> Self {
        Context { lexicon, graph }
    }
}

/// Slot name → bound value, `None` where nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBinding {
    values: IndexMap<String, Option<String>>,
}

impl ParameterBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// A binding with every name present and unresolved.
    pub fn unresolved<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParameterBinding {
            values: names.into_iter().map(|n| (n.into(), None)).collect(),
        }
    }

    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), Some(value.into()));
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.bind(name, value);
        self
    }

    /// The bound value of `name`, if it is present and resolved.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Whether every parameter has a value.
    pub fn is_complete(&self) -> bool {
        self.values.values().all(Option::is_some)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for ParameterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Some(value) => write!(f, "{name}: {value:?}")?,
                None => write!(f, "{name}: -")?,
            }
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone)]
pub struct Question {
    template: SlotTemplate,
    parameter_names: Vec<String>,
    mode: ExtractionMode,
    corpus: Vec<String>,
    types: serde_json::Value,
    solution: String,
}

impl Question {
    pub fn new(
        template: &str,
        corpus: Vec<String>,
        types: serde_json::Value,
        solution: impl Into<String>,
    ) -> Self {
        let template = SlotTemplate::parse(template);
        let parameter_names = template.slot_names();
        let mode = if parameter_names.len() == 1 && parameter_names[0] == TERM_SLOT {
            ExtractionMode::Term
        } else {
            ExtractionMode::Nodes
        };
        Question {
            template,
            parameter_names,
            mode,
            corpus,
            types,
            solution: solution.into(),
        }
    }

    pub fn template(&self) -> &str {
        self.template.source()
    }

    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    pub fn corpus(&self) -> &[String] {
        &self.corpus
    }

    /// The type descriptor from the catalog, kept as written.
    pub fn types(&self) -> &serde_json::Value {
        &self.types
    }

    pub fn solution(&self) -> &str {
        &self.solution
    }

    /// Extract this question's parameters from `text`.
    ///
    /// Returns `Ok(None)` when a "what is" question does not have that shape.
    /// Fails with [`QuestionError::AmbiguousParameter`] when a slot's label is
    /// carried by more than one node mentioned in the text.
    pub fn parameters(
        &self,
        text: &str,
        context: &Context<'_>,
    ) -> Result<Option<ParameterBinding>, QuestionError> {
        match self.mode {
            ExtractionMode::Term => Ok(what_is_term(text)
                .map(|term| ParameterBinding::new().with(TERM_SLOT, term))),
            ExtractionMode::Nodes => self.node_parameters(text, context).map(Some),
        }
    }

    fn node_parameters(
        &self,
        text: &str,
        context: &Context<'_>,
    ) -> Result<ParameterBinding, QuestionError> {
        let candidates = extract_candidates(text, context.lexicon, context.graph)?;
        let mut binding = ParameterBinding::unresolved(self.parameter_names.iter().cloned());

        for name in &self.parameter_names {
            let matching: Vec<&str> = candidates
                .iter()
                .filter(|c| &c.label == name)
                .map(|c| c.node.as_str())
                .collect();

            match matching.as_slice() {
                [] => {}
                [node] => binding.bind(name.clone(), *node),
                _ => {
                    warn!(parameter = %name, candidates = ?matching, "ambiguous parameter");
                    return Err(QuestionError::AmbiguousParameter {
                        parameter: name.clone(),
                        candidates: matching.into_iter().map(str::to_string).collect(),
                    });
                }
            }
        }

        Ok(binding)
    }

    /// Render the template with each bound node replaced by its description.
    ///
    /// Values whose description cannot be fetched are used as they are;
    /// unbound slots keep their placeholder.
    pub fn restate(&self, binding: &ParameterBinding, graph: &dyn KnowledgeGraph) -> String {
        let mut values = HashMap::new();
        for (name, value) in binding.iter() {
            let Some(value) = value else { continue };
            let description = match graph.node_property(value, DESCRIPTION) {
                Ok(description) => description,
                Err(error) => {
                    debug!(parameter = name, value, %error, "using raw value in restatement");
                    value.to_string()
                }
            };
            values.insert(name.to_string(), description);
        }
        self.template.substitute(&values)
    }

    /// Restate the question once per binding.
    pub fn examples<'b>(
        &self,
        bindings: impl IntoIterator<Item = &'b ParameterBinding>,
        graph: &dyn KnowledgeGraph,
    ) -> Vec<String> {
        bindings
            .into_iter()
            .map(|binding| self.restate(binding, graph))
            .collect()
    }
}

/// Pull X out of "what is X", "what is a X" or "what is an X".
///
/// Question marks are dropped and the text is trimmed and lowercased first.
/// The leading "what is" is required; the article is optional.
pub fn what_is_term(text: &str) -> Option<String> {
    let text = text.replace('?', "").trim().to_lowercase();
    let rest = text.strip_prefix("what is")?;

    let after_space = rest.trim_start();
    for article in ["a", "an"] {
        if let Some(term) = after_space
            .strip_prefix(article)
            .and_then(leading_whitespace_then_term)
        {
            return Some(term);
        }
    }

    leading_whitespace_then_term(rest)
}

/// Requires at least one whitespace character, then a non-empty term that
/// runs to the end of the line.
fn leading_whitespace_then_term(s: &str) -> Option<String> {
    if !s.starts_with(char::is_whitespace) {
        return None;
    }
    let term = s.trim_start();
    let term = term.split('\n').next().unwrap_or_default().trim();
    (!term.is_empty()).then(|| term.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use testresult::TestResult;

    fn what_is() -> Question {
        Question::new("What is $term?", vec!["what is a dog".into()], json!([]), "Q0")
    }

    fn protects_against() -> Question {
        Question::new(
            "What genetic conditions might offer protection against $disont_disease?",
            vec!["what genetic conditions protect against malaria".into()],
            json!(["omim_disease"]),
            "Q1",
        )
    }

    fn fixtures() -> (Lexicon, MemoryGraph) {
        let lexicon = Lexicon::new()
            .with_name("DOID:12365", "malaria")
            .with_name("DOID:14325", "mixed malaria")
            .with_name("DOID:4960", "bone marrow cancer")
            .with_name("DOID:13403", "cerebral sarcoidosis")
            .with_name("OMIM:1", "sickle cell anemia");
        let graph = MemoryGraph::new()
            .with_node("DOID:12365", "disont_disease", "malaria")
            .with_node("DOID:14325", "disont_disease", "mixed malaria")
            .with_node("DOID:4960", "disont_disease", "bone marrow cancer")
            .with_node("DOID:13403", "disont_disease", "cerebral sarcoidosis")
            .with_node("OMIM:1", "omim_disease", "sickle cell anemia");
        (lexicon, graph)
    }

    #[test]
    fn mode_follows_slots() {
        assert_eq!(what_is().mode(), ExtractionMode::Term);
        assert_eq!(protects_against().mode(), ExtractionMode::Nodes);
        let two = Question::new("$term and $other", vec![], json!(null), "Q");
        assert_eq!(two.mode(), ExtractionMode::Nodes);
    }

    #[test]
    fn what_is_terms() {
        assert_eq!(what_is_term("What is a dog").as_deref(), Some("dog"));
        assert_eq!(what_is_term("What is an otolith").as_deref(), Some("otolith"));
        assert_eq!(
            what_is_term("What is Creutzfeldt Jakob disease, subtype I").as_deref(),
            Some("creutzfeldt jakob disease, subtype i")
        );
        assert_eq!(what_is_term("  what is   apple? ").as_deref(), Some("apple"));
        assert_eq!(what_is_term("what is a").as_deref(), Some("a"));
    }

    #[test]
    fn what_is_requires_the_prefix() {
        assert_eq!(what_is_term("define dog"), None);
        assert_eq!(what_is_term("what is"), None);
        assert_eq!(what_is_term("what isdog"), None);
    }

    #[test]
    fn term_mode_binds_term() -> TestResult {
        let (lexicon, graph) = fixtures();
        let context = Context::new(&lexicon, &graph);
        let binding = what_is().parameters("What is a dog", &context)?;
        assert_eq!(binding, Some(ParameterBinding::new().with("term", "dog")));
        assert_eq!(what_is().parameters("tell me", &context)?, None);
        Ok(())
    }

    #[test]
    fn node_mode_binds_each_disease() -> TestResult {
        let (lexicon, graph) = fixtures();
        let context = Context::new(&lexicon, &graph);
        let question = protects_against();

        for (text, expected) in [
            ("what genetic conditions might protect against malaria?", "DOID:12365"),
            ("what genetic conditions might protect against mixed malaria?", "DOID:14325"),
            ("what genetic conditions might protect against bone marrow cancer?", "DOID:4960"),
            ("what genetic conditions might protect against cerebral sarcoidosis?", "DOID:13403"),
        ] {
            let binding = question.parameters(text, &context)?.unwrap_or_default();
            assert_eq!(binding.get("disont_disease"), Some(expected), "{text}");
        }
        Ok(())
    }

    #[test]
    fn unmatched_parameters_stay_unresolved() -> TestResult {
        let (lexicon, graph) = fixtures();
        let context = Context::new(&lexicon, &graph);
        let binding = protects_against()
            .parameters("What genetic conditions may protect against asdfasdf?", &context)?
            .unwrap_or_default();
        assert!(binding.contains("disont_disease"));
        assert_eq!(binding.get("disont_disease"), None);
        assert!(!binding.is_complete());
        Ok(())
    }

    #[test]
    fn two_nodes_with_one_label_is_ambiguous() {
        let (lexicon, graph) = fixtures();
        let context = Context::new(&lexicon, &graph);
        let result = protects_against().parameters(
            "does malaria relate to cerebral sarcoidosis at all",
            &context,
        );
        match result {
            Err(QuestionError::AmbiguousParameter { parameter, candidates }) => {
                assert_eq!(parameter, "disont_disease");
                assert_eq!(candidates, vec!["DOID:13403", "DOID:12365"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn other_labels_do_not_conflict() -> TestResult {
        let (lexicon, graph) = fixtures();
        let context = Context::new(&lexicon, &graph);
        let binding = protects_against()
            .parameters("does sickle cell anemia protect against malaria", &context)?
            .unwrap_or_default();
        assert_eq!(binding.get("disont_disease"), Some("DOID:12365"));
        Ok(())
    }

    #[test]
    fn restating_an_empty_binding_keeps_the_template() {
        let (_, graph) = fixtures();
        for question in [what_is(), protects_against()] {
            assert_eq!(
                question.restate(&ParameterBinding::new(), &graph),
                question.template()
            );
        }
    }

    #[test]
    fn restating_uses_descriptions_or_raw_values() {
        let (_, graph) = fixtures();
        let restated = protects_against().restate(
            &ParameterBinding::new().with("disont_disease", "DOID:14325"),
            &graph,
        );
        assert_eq!(
            restated,
            "What genetic conditions might offer protection against mixed malaria?"
        );

        let restated = what_is().restate(&ParameterBinding::new().with("term", "dog"), &graph);
        assert_eq!(restated, "What is dog?");
    }

    #[test]
    fn unresolved_slots_keep_placeholders() {
        let (_, graph) = fixtures();
        let binding = ParameterBinding::unresolved(["disont_disease"]);
        assert_eq!(
            protects_against().restate(&binding, &graph),
            protects_against().template()
        );
    }

    #[test]
    fn examples_restate_each_binding() {
        let (_, graph) = fixtures();
        let bindings = [
            ParameterBinding::new().with("disont_disease", "DOID:12365"),
            ParameterBinding::new().with("disont_disease", "DOID:4960"),
        ];
        assert_eq!(
            protects_against().examples(&bindings, &graph),
            vec![
                "What genetic conditions might offer protection against malaria?",
                "What genetic conditions might offer protection against bone marrow cancer?",
            ]
        );
    }

    #[test]
    fn bindings_serialize_as_objects() -> TestResult {
        let binding = ParameterBinding::unresolved(["omim_disease", "disont_disease"])
            .with("disont_disease", "DOID:12365");
        let value = serde_json::to_value(&binding)?;
        assert_eq!(value, json!({ "omim_disease": null, "disont_disease": "DOID:12365" }));
        assert_eq!(serde_json::from_value::<ParameterBinding>(value)?, binding);
        Ok(())
    }
}
