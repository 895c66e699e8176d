//! Runtime configuration, read from a JSON file.
//!
//! ```json
//! {
//!   "lexicon": {
//!     "node_names": "KGmetadata/NodeNamesDescriptions.tsv",
//!     "edge_types": "KGmetadata/EdgeTypes.tsv",
//!     "node_labels": "KGmetadata/NodeLabels.tsv"
//!   },
//!   "catalog": "Questions.tsv",
//!   "knowledge_graph": { "nodes": "KGmetadata/Nodes.tsv" },
//!   "matching": { "min_similarity": 0.1 }
//! }
//! ```
//!
//! Every field has a default. Relative paths are resolved against the
//! directory holding the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::QuestionError;
use crate::matcher::LabelFallbacks;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconPaths {
    pub node_names: PathBuf,
    pub edge_types: PathBuf,
    pub node_labels: PathBuf,
}

impl Default for LexiconPaths {
    fn default() -> Self {
        LexiconPaths {
            node_names: "data/KGmetadata/NodeNamesDescriptions.tsv".into(),
            edge_types: "data/KGmetadata/EdgeTypes.tsv".into(),
            node_labels: "data/KGmetadata/NodeLabels.tsv".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Node-property table for the in-memory knowledge graph.
    pub nodes: PathBuf,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            nodes: "data/KGmetadata/Nodes.tsv".into(),
        }
    }
}

/// Lowest corpus similarity accepted unless configured otherwise.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Lowest corpus similarity accepted when selecting a template.
    pub min_similarity: f64,
    #[serde(flatten)]
    pub fallbacks: LabelFallbacks,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        MatchingConfig {
            min_similarity: DEFAULT_MIN_SIMILARITY,
            fallbacks: LabelFallbacks::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lexicon: LexiconPaths,
    pub catalog: PathBuf,
    pub knowledge_graph: GraphConfig,
    pub matching: MatchingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lexicon: LexiconPaths::default(),
            catalog: "data/Questions.tsv".into(),
            knowledge_graph: GraphConfig::default(),
            matching: MatchingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, QuestionError> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| QuestionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file and resolve its paths against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuestionError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| QuestionError::io(path, e))?;
        let config = Self::from_json(&json)?;
        Ok(match path.parent() {
            Some(base) => config.relative_to(base),
            None => config,
        })
    }

    /// Resolve every relative path against `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        for path in [
            &mut self.lexicon.node_names,
            &mut self.lexicon.edge_types,
            &mut self.lexicon.node_labels,
            &mut self.catalog,
            &mut self.knowledge_graph.nodes,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    fn validate(&self) -> Result<(), QuestionError> {
        let min = self.matching.min_similarity;
        if !(0.0..=1.0).contains(&min) {
            return Err(QuestionError::Config(format!(
                "matching.min_similarity must be within [0, 1], got {min}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test]
    fn empty_object_is_all_defaults() -> TestResult {
        assert_eq!(Config::from_json("{}")?, Config::default());
        Ok(())
    }

    #[test]
    fn partial_sections_keep_other_defaults() -> TestResult {
        let config = Config::from_json(
            r#"{ "matching": { "min_similarity": 0.3, "disease_label": "disont_disease" } }"#,
        )?;
        assert_eq!(config.matching.min_similarity, 0.3);
        assert_eq!(config.matching.fallbacks.disease_label, "disont_disease");
        assert_eq!(config.matching.fallbacks.protein_label, "uniprot_protein");
        assert_eq!(config.catalog, PathBuf::from("data/Questions.tsv"));
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let result = Config::from_json(r#"{ "matching": { "min_similarity": 2.0 } }"#);
        assert!(matches!(result, Err(QuestionError::Config(_))));
    }

    #[test]
    fn resolves_relative_paths() {
        let config = Config {
            catalog: "/abs/Questions.tsv".into(),
            ..Config::default()
        }
        .relative_to(Path::new("/etc/rtx"));
        assert_eq!(config.catalog, PathBuf::from("/abs/Questions.tsv"));
        assert_eq!(
            config.lexicon.edge_types,
            PathBuf::from("/etc/rtx/data/KGmetadata/EdgeTypes.tsv")
        );
    }
}
