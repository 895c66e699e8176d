//! # RTX path scoring
//!
//! A first-order Markov chain over knowledge-graph path *types*. Each state
//! is a `(relationship type, node label)` pair; a trained chain scores how
//! plausible a path through the graph is by multiplying the transition
//! probabilities along it.
//!
//! ```
//! use rtx_markov::{MarkovChain, StateSpace, Training};
//!
//! let space = StateSpace::new(
//!     ["disease_affects", "is_member_of"],
//!     ["uniprot_protein", "reactome_pathway"],
//! );
//! let path = [
//!     "omim_disease",
//!     "disease_affects",
//!     "uniprot_protein",
//!     "is_member_of",
//!     "reactome_pathway",
//! ];
//! let chain = MarkovChain::train(space, [path], Training::MaximumLikelihood).unwrap();
//! assert_eq!(chain.path_probability(&path).unwrap(), 1.0);
//! ```

pub mod chain;
pub mod error;
pub mod state;

pub use chain::{DEFAULT_PSEUDO_COUNT, MarkovChain, Training};
pub use error::MarkovError;
pub use state::{State, StateSpace, path_states};
