use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rtx-ask")]
#[command(bin_name = "rtx-ask")]
#[command(about = "Interpret biomedical questions against the RTX question catalog", long_about = None)]
pub struct AskCli {
    /// JSON configuration naming the lexicon, catalog and knowledge graph files
    #[arg(short, long, env = "RTX_CONFIG", default_value = "rtx.json", global = true)]
    pub config: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Match a question to a template and extract its parameters
    Ask {
        /// Print the interpretation as JSON
        #[arg(long)]
        json: bool,

        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// List the question templates in the catalog
    Templates,

    /// Show which node label a phrase refers to
    Label {
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,
    },

    /// Show which edge type a phrase refers to
    Edge {
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,
    },

    /// Score a type path with a stored Markov chain
    PathProbability {
        /// Trained chain, as written by `MarkovChain::to_json`
        #[arg(long)]
        model: PathBuf,

        /// Alternating node labels and relationship types
        #[arg(required = true, num_args = 1..)]
        types: Vec<String>,
    },
}
