//! Subcommand implementations.

pub mod browse;
pub mod dump;

use std::path::PathBuf;

use crate::cli::LoadArgs;
use crate::config::{Config, NavigatorConfig};
use crate::error::{GroveError, Result};
use crate::hierarchy::{load_directory, LoadOptions, NodeTree};

/// Resolve the requested root and load it with config values overridden by flags.
fn load_tree(args: &LoadArgs, config: &Config) -> Result<(PathBuf, NodeTree)> {
    if !args.path.exists() {
        return Err(GroveError::PathNotFound(args.path.clone()));
    }
    let root = args.path.canonicalize().map_err(|source| GroveError::Io {
        path: args.path.clone(),
        source,
    })?;

    let options = load_options(args, config);
    tracing::info!(path = %root.display(), ?options, "Loading tree");
    let tree = load_directory(&root, &options)?;
    Ok((root, tree))
}

fn load_options(args: &LoadArgs, config: &Config) -> LoadOptions {
    LoadOptions::new()
        .with_max_depth(args.max_depth.unwrap_or(config.browser.max_depth))
        .with_hidden(args.hidden || config.browser.show_hidden)
}

fn navigator_config(args: &LoadArgs, config: &Config) -> NavigatorConfig {
    NavigatorConfig {
        multi_select: config.navigator.multi_select && !args.single,
        ..config.navigator
    }
}
