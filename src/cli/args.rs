//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Height-balanced binary search tree: balance diagnostics and graphviz rendering
#[derive(Parser, Debug)]
#[command(name = "avltree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -v info, -vv debug, -vvv trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding the local .avltree.toml (default: cwd)
    #[arg(short = 'C', long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Keys to insert, in order.
#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// Keys, inserted after any keys read from --file
    pub keys: Vec<String>,

    /// Read whitespace-separated keys from a file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print keys in order with their balance factors
    Print {
        #[command(flatten)]
        input: KeyArgs,
    },

    /// Show the tree shape with heights and balance factors
    Tree {
        #[command(flatten)]
        input: KeyArgs,
    },

    /// Write the tree as a graphviz file, optionally rendering an image
    Dot {
        #[command(flatten)]
        input: KeyArgs,
        /// Output .dot file
        #[arg(short, long, default_value = "tree.dot", value_hint = ValueHint::FilePath)]
        output: PathBuf,
        /// Run the configured renderer on the written file
        #[arg(long)]
        render: bool,
    },

    /// Insert keys one at a time, checking every invariant after each insert
    Check {
        #[command(flatten)]
        input: KeyArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
    /// Print a commented config template
    Template,
}
