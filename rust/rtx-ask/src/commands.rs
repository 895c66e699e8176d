//! The subcommands, writing their results to any [`Write`] sink.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use rtx_markov::MarkovChain;
use rtx_question::{
    Config, Interpreter, Lexicon, Matcher, MemoryGraph, Normalizer, QuestionCatalog,
    TokenOverlapRanker,
};
use tracing::info;

use crate::cli::{AskCli, Command};

/// The tables a question is interpreted against, loaded from one
/// configuration file.
pub struct Resources {
    pub config: Config,
    pub lexicon: Lexicon,
    pub catalog: QuestionCatalog,
    pub graph: MemoryGraph,
}

impl Resources {
    pub fn open(config_path: &Path) -> Result<Self> {
        let config = Config::load(config_path)
            .with_context(|| format!("reading configuration {}", config_path.display()))?;
        Self::load(config)
    }

    pub fn load(config: Config) -> Result<Self> {
        let lexicon = Lexicon::load(
            &config.lexicon.node_names,
            &config.lexicon.edge_types,
            &config.lexicon.node_labels,
        )
        .context("loading lexicon")?;
        let catalog = QuestionCatalog::load(&config.catalog).context("loading question catalog")?;
        let graph = MemoryGraph::load(&config.knowledge_graph.nodes)
            .context("loading knowledge graph nodes")?;
        info!(nodes = graph.len(), "resources ready");
        Ok(Resources {
            config,
            lexicon,
            catalog,
            graph,
        })
    }
}

pub fn run(cli: AskCli, out: &mut impl Write) -> Result<()> {
    let resources = || Resources::open(&cli.config);
    match cli.command {
        Command::Ask { json, question } => ask(&resources()?, &question.join(" "), json, out),
        Command::Templates => templates(&resources()?, out),
        Command::Label { phrase } => label(&resources()?, &phrase.join(" "), out),
        Command::Edge { phrase } => edge(&resources()?, &phrase.join(" "), out),
        Command::PathProbability { model, types } => path_probability(&model, &types, out),
    }
}

pub fn ask(resources: &Resources, question: &str, json: bool, out: &mut impl Write) -> Result<()> {
    let ranker = TokenOverlapRanker::default();
    let matching = &resources.config.matching;
    let interpreter = Interpreter::new(
        &resources.lexicon,
        &resources.catalog,
        &resources.graph,
        &ranker,
    )
    .with_min_similarity(matching.min_similarity)
    .with_fallbacks(matching.fallbacks.clone());

    let answer = interpreter.interpret(question)?;

    if json {
        let value = serde_json::json!({
            "template": answer.template,
            "solution": answer.solution,
            "score": answer.score,
            "parameters": answer.parameters,
            "restated": answer.restated,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    writeln!(out, "template   {} (score {:.3})", answer.template, answer.score)?;
    writeln!(out, "solution   {}", answer.solution)?;
    match &answer.parameters {
        Some(binding) => writeln!(out, "parameters {binding}")?,
        None => writeln!(out, "parameters -")?,
    }
    writeln!(out, "restated   {}", answer.restated)?;
    Ok(())
}

pub fn templates(resources: &Resources, out: &mut impl Write) -> Result<()> {
    for (index, question) in resources.catalog.questions().iter().enumerate() {
        writeln!(out, "{index}\t{}\t{}", question.solution(), question.template())?;
    }
    Ok(())
}

pub fn label(resources: &Resources, phrase: &str, out: &mut impl Write) -> Result<()> {
    let normalizer = Normalizer::english();
    let matcher = Matcher::new(
        &resources.lexicon,
        &normalizer,
        &resources.config.matching.fallbacks,
    );
    let Some(label) = matcher.node_label(phrase) else {
        bail!("no node label matches {phrase:?}");
    };
    writeln!(out, "{label}")?;
    Ok(())
}

pub fn edge(resources: &Resources, phrase: &str, out: &mut impl Write) -> Result<()> {
    let normalizer = Normalizer::english();
    let matcher = Matcher::new(
        &resources.lexicon,
        &normalizer,
        &resources.config.matching.fallbacks,
    );
    let Some(edge_type) = matcher.edge_type(phrase) else {
        bail!("no edge type matches {phrase:?}");
    };
    writeln!(out, "{edge_type}")?;
    Ok(())
}

pub fn path_probability(model: &Path, types: &[String], out: &mut impl Write) -> Result<()> {
    let json = fs::read_to_string(model)
        .with_context(|| format!("reading model {}", model.display()))?;
    let chain = MarkovChain::from_json(&json)
        .with_context(|| format!("parsing model {}", model.display()))?;
    writeln!(out, "{}", chain.path_probability(types)?)?;
    Ok(())
}
