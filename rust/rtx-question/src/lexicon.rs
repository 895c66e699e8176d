//! The lexicon store: node names, their descriptions, and the edge-type and
//! node-label vocabularies of the knowledge graph.
//!
//! A [`Lexicon`] is built once at startup and only read afterwards. It is
//! handed by reference to everything that needs it; there is no global copy.
//!
//! ## File formats
//!
//! - node names: `name \t description` per line; a missing description
//!   becomes [`MISSING_DESCRIPTION`].
//! - edge types, node labels: one token per line.
//!
//! Blank lines are ignored in all three tables.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use crate::error::QuestionError;
use crate::tsv;

/// Description recorded for a node name that has none.
pub const MISSING_DESCRIPTION: &str = "N/A";

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    /// name → description, in file order.
    descriptions: IndexMap<String, String>,
    /// description → every name carrying it, in file order.
    names_by_description: IndexMap<String, Vec<String>>,
    /// lowercased name → names, in file order.
    names_by_lowercase: HashMap<String, Vec<String>>,
    /// lowercased description → keys of `names_by_description`, in its order.
    descriptions_by_lowercase: HashMap<String, Vec<String>>,
    edge_types: Vec<String>,
    node_labels: Vec<String>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node name. Re-registering a name replaces its description.
    pub fn insert_name(&mut self, name: impl Into<String>, description: impl Into<String>) {
        let name = name.into();
        let description = description.into();

        match self.descriptions.insert(name.clone(), description.clone()) {
            Some(previous) => self.unlink(&name, &previous),
            None => self
                .names_by_lowercase
                .entry(name.to_lowercase())
                .or_default()
                .push(name.clone()),
        }

        if description != MISSING_DESCRIPTION {
            if !self.names_by_description.contains_key(&description) {
                self.descriptions_by_lowercase
                    .entry(description.to_lowercase())
                    .or_default()
                    .push(description.clone());
            }
            self.names_by_description
                .entry(description)
                .or_default()
                .push(name);
        }
    }

    /// Drop `name` from the names carrying `description`.
    fn unlink(&mut self, name: &str, description: &str) {
        let Some(names) = self.names_by_description.get_mut(description) else {
            return;
        };
        names.retain(|n| n != name);
        if !names.is_empty() {
            return;
        }
        self.names_by_description.shift_remove(description);
        let lowered = description.to_lowercase();
        if let Some(variants) = self.descriptions_by_lowercase.get_mut(&lowered) {
            variants.retain(|d| d != description);
            if variants.is_empty() {
                self.descriptions_by_lowercase.remove(&lowered);
            }
        }
    }

    pub fn with_name(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.insert_name(name, description);
        self
    }

    pub fn with_edge_types<I, S>(mut self, edge_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edge_types.extend(edge_types.into_iter().map(Into::into));
        self
    }

    pub fn with_node_labels<I, S>(mut self, node_labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.node_labels
            .extend(node_labels.into_iter().map(Into::into));
        self
    }

    /// Load all three tables from disk.
    pub fn load(
        node_names: impl AsRef<Path>,
        edge_types: impl AsRef<Path>,
        node_labels: impl AsRef<Path>,
    ) -> Result<Self, QuestionError> {
        let (node_names, edge_types, node_labels) =
            (node_names.as_ref(), edge_types.as_ref(), node_labels.as_ref());

        let mut lexicon = Lexicon::new();
        lexicon.read_names(open(node_names)?, node_names)?;
        lexicon.edge_types = read_tokens(open(edge_types)?, edge_types)?;
        lexicon.node_labels = read_tokens(open(node_labels)?, node_labels)?;

        info!(
            names = lexicon.descriptions.len(),
            edge_types = lexicon.edge_types.len(),
            node_labels = lexicon.node_labels.len(),
            "loaded lexicon"
        );
        Ok(lexicon)
    }

    /// Read `name \t description` rows into the name tables.
    pub fn read_node_names(&mut self, input: impl Read) -> Result<(), QuestionError> {
        self.read_names(input, Path::new(tsv::IN_MEMORY))
    }

    fn read_names(&mut self, input: impl Read, path: &Path) -> Result<(), QuestionError> {
        let malformed = |line_number: usize, line: String| QuestionError::MalformedLexiconLine {
            table: "node names",
            line_number,
            line,
        };

        let mut rows = tsv::reader(input, false);
        for record in rows.records() {
            let record = record.map_err(|e| tsv::record_error(path, e, malformed))?;
            if tsv::is_blank(&record) {
                continue;
            }
            let name = record.get(0).unwrap_or_default().trim();
            if name.is_empty() {
                return Err(malformed(tsv::line_number(&record), tsv::line(&record)));
            }
            let description = match record.get(1).map(str::trim_end) {
                Some(description) if !description.is_empty() => description,
                _ => MISSING_DESCRIPTION,
            };
            self.insert_name(name, description);
        }
        Ok(())
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.descriptions.get(name).map(String::as_str)
    }

    pub fn edge_types(&self) -> &[String] {
        &self.edge_types
    }

    pub fn node_labels(&self) -> &[String] {
        &self.node_labels
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    /// Find every node name that `text` denotes.
    ///
    /// Checked in order: `text` as a node name, `text` as a description, then a
    /// case-insensitive match against all names followed by all descriptions.
    /// Every hit is appended, so the result can hold duplicates; callers
    /// deduplicate.
    pub fn lookup(&self, text: &str) -> Vec<&str> {
        let mut found = Vec::new();

        if let Some((name, _)) = self.descriptions.get_key_value(text) {
            found.push(name.as_str());
        } else if let Some(names) = self.names_by_description.get(text) {
            found.extend(names.iter().map(String::as_str));
        }

        let lowered = text.to_lowercase();
        if let Some(names) = self.names_by_lowercase.get(&lowered) {
            found.extend(names.iter().map(String::as_str));
        }
        for description in self.descriptions_by_lowercase.get(&lowered).into_iter().flatten() {
            if let Some(names) = self.names_by_description.get(description) {
                found.extend(names.iter().map(String::as_str));
            }
        }

        found
    }
}

fn open(path: &Path) -> Result<fs::File, QuestionError> {
    fs::File::open(path).map_err(|e| QuestionError::io(path, e))
}

/// One token per row; only the first cell counts.
fn read_tokens(input: impl Read, path: &Path) -> Result<Vec<String>, QuestionError> {
    let mut tokens = Vec::new();
    let mut rows = tsv::reader(input, false);
    for record in rows.records() {
        let record = record.map_err(|e| {
            tsv::record_error(path, e, |line_number, line| {
                QuestionError::MalformedLexiconLine {
                    table: "vocabulary",
                    line_number,
                    line,
                }
            })
        })?;
        let token = record.get(0).unwrap_or_default().trim();
        if !token.is_empty() {
            tokens.push(token.to_string());
        }
    }
    Ok(tokens)
}
