//! The knowledge-graph lookup seam.
//!
//! Parameter extraction needs each candidate node's label, and restatement
//! needs node descriptions. Both come from a [`KnowledgeGraph`]. Lookups are
//! synchronous; a networked backend is expected to do its own timeouts and
//! retries behind this trait.
//!
//! [`MemoryGraph`] holds node properties in memory and can be loaded from a
//! TSV table whose header row names the properties:
//!
//! ```text
//! id          label           description
//! DOID:12365  disont_disease  malaria
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::{GraphError, QuestionError};
use crate::tsv;

/// Property holding a node's label.
pub const LABEL: &str = "label";
/// Property holding a node's human-readable description.
pub const DESCRIPTION: &str = "description";

pub trait KnowledgeGraph {
    /// Fetch one property of the node `id`.
    fn node_property(&self, id: &str, property: &str) -> Result<String, GraphError>;

    /// Whether some node has `property` equal to `value`.
    fn node_exists_with_property(&self, value: &str, property: &str) -> Result<bool, GraphError>;

    fn node_label(&self, id: &str) -> Result<String, GraphError> {
        self.node_property(id, LABEL)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    nodes: HashMap<String, HashMap<String, String>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property on a node, creating the node if needed.
    pub fn set_property(
        &mut self,
        id: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.nodes
            .entry(id.into())
            .or_default()
            .insert(property.into(), value.into());
    }

    /// Shorthand for a node with a label and a description.
    pub fn with_node(
        mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let id = id.into();
        self.set_property(id.clone(), LABEL, label);
        self.set_property(id, DESCRIPTION, description);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuestionError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|e| QuestionError::io(path, e))?;
        let graph = Self::read_table(file, path)?;
        info!(nodes = graph.len(), path = %path.display(), "loaded knowledge graph nodes");
        Ok(graph)
    }

    /// Read a node-property table. The first line is the header; its first
    /// column is the node id and the remaining columns are property names.
    /// Empty cells are skipped.
    pub fn read_tsv(input: impl Read) -> Result<Self, QuestionError> {
        Self::read_table(input, Path::new(tsv::IN_MEMORY))
    }

    fn read_table(input: impl Read, path: &Path) -> Result<Self, QuestionError> {
        let malformed = |line_number: usize, line: String| QuestionError::MalformedLexiconLine {
            table: "nodes",
            line_number,
            line,
        };

        let mut rows = tsv::reader(input, true);
        let header: Vec<String> = rows
            .headers()
            .map_err(|e| tsv::record_error(path, e, malformed))?
            .iter()
            .map(|property| property.trim().to_string())
            .collect();

        let mut graph = MemoryGraph::new();
        for record in rows.records() {
            let record = record.map_err(|e| tsv::record_error(path, e, malformed))?;
            if tsv::is_blank(&record) {
                continue;
            }
            let id = record.get(0).unwrap_or_default().trim();
            if id.is_empty() {
                return Err(malformed(tsv::line_number(&record), tsv::line(&record)));
            }
            graph.nodes.entry(id.to_string()).or_default();
            for (property, value) in header.iter().skip(1).zip(record.iter().skip(1)) {
                let value = value.trim_end();
                if !value.is_empty() {
                    graph.set_property(id, property.as_str(), value);
                }
            }
        }

        Ok(graph)
    }
}

impl KnowledgeGraph for MemoryGraph {
    fn node_property(&self, id: &str, property: &str) -> Result<String, GraphError> {
        let node = self.nodes.get(id).ok_or_else(|| GraphError::NodeNotFound {
            id: id.to_string(),
        })?;
        node.get(property)
            .cloned()
            .ok_or_else(|| GraphError::MissingProperty {
                id: id.to_string(),
                property: property.to_string(),
            })
    }

    fn node_exists_with_property(&self, value: &str, property: &str) -> Result<bool, GraphError> {
        Ok(self
            .nodes
            .values()
            .any(|node| node.get(property).is_some_and(|v| v == value)))
    }
}
