use std::fs;

use pretty_assertions::assert_eq;
use rtx_markov::{MarkovChain, StateSpace, Training};
use testresult::TestResult;

const RELATIONSHIPS: [&str; 3] = ["disease_affects", "is_member_of", "gene_assoc_with"];
const LABELS: [&str; 4] = [
    "omim_disease",
    "uniprot_protein",
    "reactome_pathway",
    "disont_disease",
];

fn observed_path() -> Vec<&'static str> {
    vec![
        "omim_disease",
        "disease_affects",
        "uniprot_protein",
        "is_member_of",
        "reactome_pathway",
        "is_member_of",
        "uniprot_protein",
        "gene_assoc_with",
        "disont_disease",
    ]
}

#[test]
fn maximum_likelihood_reproduces_its_only_path() -> TestResult {
    let space = StateSpace::new(RELATIONSHIPS, LABELS);
    let chain = MarkovChain::train(space, [observed_path()], Training::MaximumLikelihood)?;
    assert_eq!(chain.path_probability(&observed_path())?, 1.0);
    Ok(())
}

#[test]
fn laplace_spreads_mass_over_every_state() -> TestResult {
    let space = StateSpace::new(RELATIONSHIPS, LABELS);
    let n = space.len() as f64;
    let chain = MarkovChain::train(space, [observed_path()], Training::laplace())?;

    let step = 1.01 / (1.0 + 0.01 * n);
    let expected = step.powi(3);
    let actual = chain.path_probability(&observed_path())?;
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
    assert!(actual < 1.0);
    Ok(())
}

#[test]
fn unseen_transitions_are_impossible_without_smoothing() -> TestResult {
    let space = StateSpace::new(RELATIONSHIPS, LABELS);
    let chain = MarkovChain::train(space, [observed_path()], Training::MaximumLikelihood)?;
    let reversed = [
        "disont_disease",
        "gene_assoc_with",
        "uniprot_protein",
        "disease_affects",
        "omim_disease",
    ];
    assert_eq!(chain.path_probability(&reversed)?, 0.0);
    Ok(())
}

#[test]
fn stored_chains_score_like_freshly_trained_ones() -> TestResult {
    let space = StateSpace::new(RELATIONSHIPS, LABELS);
    let chain = MarkovChain::train(space, [observed_path()], Training::laplace())?;

    let dir = tempfile::tempdir()?;
    let model = dir.path().join("model.json");
    fs::write(&model, chain.to_json()?)?;
    let loaded = MarkovChain::from_json(&fs::read_to_string(&model)?)?;

    assert_eq!(loaded.states(), chain.states());
    assert_eq!(
        loaded.path_probability(&observed_path())?,
        chain.path_probability(&observed_path())?
    );
    Ok(())
}
