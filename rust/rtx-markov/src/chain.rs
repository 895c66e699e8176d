//! Training and evaluating the transition matrix.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::MarkovError;
use crate::state::{State, StateSpace};

/// Pseudo-count added to every cell by [`Training::laplace`].
pub const DEFAULT_PSEUDO_COUNT: f64 = 0.01;

/// How observed transition counts become probabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Training {
    /// Row-normalized counts. States never left keep an all-zero row.
    MaximumLikelihood,
    /// `pseudo_count` is added to every cell before normalizing, so unseen
    /// transitions keep a small probability.
    Laplace { pseudo_count: f64 },
}

impl Training {
    pub fn laplace() -> Self {
        Training::Laplace {
            pseudo_count: DEFAULT_PSEUDO_COUNT,
        }
    }
}

/// A first-order Markov chain over [`State`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkovChain {
    states: StateSpace,
    /// Row `i` holds the probabilities of moving from state `i`.
    transitions: Vec<Vec<f64>>,
}

impl MarkovChain {
    /// Count the transitions along every type path in `paths` and normalize.
    pub fn train<P, S>(
        states: StateSpace,
        paths: impl IntoIterator<Item = P>,
        training: Training,
    ) -> Result<Self, MarkovError>
    where
        P: AsRef<[S]>,
        S: AsRef<str>,
    {
        let n = states.len();
        let mut counts = vec![vec![0.0_f64; n]; n];

        let mut observed = 0usize;
        for path in paths {
            for (from, to) in states.transitions(path.as_ref())? {
                counts[from][to] += 1.0;
                observed += 1;
            }
        }

        if let Training::Laplace { pseudo_count } = training {
            if !pseudo_count.is_finite() || pseudo_count < 0.0 {
                return Err(MarkovError::InvalidPseudoCount(pseudo_count));
            }
            for row in &mut counts {
                row.iter_mut().for_each(|cell| *cell += pseudo_count);
            }
        }

        for row in &mut counts {
            let total: f64 = row.iter().sum();
            if total > 0.0 {
                row.iter_mut().for_each(|cell| *cell /= total);
            }
        }

        info!(states = n, transitions = observed, ?training, "trained markov chain");
        Ok(MarkovChain {
            states,
            transitions: counts,
        })
    }

    pub fn states(&self) -> &StateSpace {
        &self.states
    }

    /// Probability of stepping from `from` to `to`.
    pub fn transition(&self, from: &State, to: &State) -> Result<f64, MarkovError> {
        let i = self.index(from)?;
        let j = self.index(to)?;
        Ok(self.transitions[i][j])
    }

    /// Probability that the chain generates the transitions of `path`.
    ///
    /// Paths with fewer than two states have probability 1.
    pub fn path_probability<S: AsRef<str>>(&self, path: &[S]) -> Result<f64, MarkovError> {
        let probability: f64 = self
            .states
            .transitions(path)?
            .into_iter()
            .map(|(from, to)| self.transitions[from][to])
            .product();
        debug!(probability, "scored path");
        Ok(probability)
    }

    pub fn to_json(&self) -> Result<String, MarkovError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a stored chain, checking that the matrix fits the state space.
    pub fn from_json(json: &str) -> Result<Self, MarkovError> {
        let chain: MarkovChain = serde_json::from_str(json)?;
        let n = chain.states.len();
        if chain.transitions.len() != n || chain.transitions.iter().any(|row| row.len() != n) {
            return Err(MarkovError::Shape { states: n });
        }
        Ok(chain)
    }

    fn index(&self, state: &State) -> Result<usize, MarkovError> {
        self.states
            .index_of(state)
            .ok_or_else(|| MarkovError::UnknownState(state.clone()))
    }
}
