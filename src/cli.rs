use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Grove - A keyboard-driven tree navigator and content browser
#[derive(Parser, Debug)]
#[command(name = "grove")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH", env = "GROVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse a directory tree interactively
    Browse(BrowseArgs),

    /// Print the visible outline of a directory tree
    Dump(DumpArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Options shared by every command that loads a directory.
#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    /// Directory to load
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Include hidden files
    #[arg(short = 'a', long)]
    pub hidden: bool,

    /// Maximum directory depth to load
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Allow only one selected node at a time
    #[arg(long)]
    pub single: bool,
}

#[derive(Args, Debug)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub load: LoadArgs,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Select a node by its path relative to the root (can be repeated)
    #[arg(short, long, value_name = "REL")]
    pub select: Vec<String>,

    /// Expand every directory before printing
    #[arg(short, long)]
    pub expand_all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
