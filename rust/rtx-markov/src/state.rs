//! States of the chain and how type paths map onto them.
//!
//! The knowledge graph is a multigraph, so a step along a path is described
//! by the relationship taken *and* the label of the node it lands on. A type
//! path alternates node labels and relationship types:
//!
//! ```text
//! omim_disease, disease_affects, uniprot_protein, is_member_of, reactome_pathway
//!               └──────── state ─────────┘        └──────── state ───────┘
//! ```

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::MarkovError;

/// One `(relationship type, node label)` step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub relationship: String,
    pub label: String,
}

impl State {
    pub fn new(relationship: impl Into<String>, label: impl Into<String>) -> Self {
        State {
            relationship: relationship.into(),
            label: label.into(),
        }
    }
}

/// Every state the chain knows, each with a fixed matrix index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSpace {
    states: IndexSet<State>,
}

impl StateSpace {
    /// The product of `relationship_types` and `node_labels`, relationship
    /// major. Repeated inputs do not create repeated states.
    pub fn new<R, L>(relationship_types: R, node_labels: L) -> Self
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        let labels: Vec<L::Item> = node_labels.into_iter().collect();
        let mut states = IndexSet::new();
        for relationship in relationship_types {
            for label in &labels {
                states.insert(State::new(relationship.as_ref(), label.as_ref()));
            }
        }
        StateSpace { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    pub fn index_of(&self, state: &State) -> Option<usize> {
        self.states.get_index_of(state)
    }

    /// Matrix indices of every transition along `path`.
    pub fn transitions<S: AsRef<str>>(
        &self,
        path: &[S],
    ) -> Result<Vec<(usize, usize)>, MarkovError> {
        let indices = path_states(path)
            .into_iter()
            .map(|state| self.index_of(&state).ok_or(MarkovError::UnknownState(state)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(indices.windows(2).map(|w| (w[0], w[1])).collect())
    }
}

/// The states visited by a type path: `(path[i], path[i + 1])` for every odd
/// `i` that leaves room for the label.
pub fn path_states<S: AsRef<str>>(path: &[S]) -> Vec<State> {
    path.windows(2)
        .skip(1)
        .step_by(2)
        .map(|pair| State::new(pair[0].as_ref(), pair[1].as_ref()))
        .collect()
}
