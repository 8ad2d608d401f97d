//! Browse command implementation

use std::time::Duration;

use super::{load_options, load_tree, navigator_config};
use crate::cli::BrowseArgs;
use crate::config::Config;
use crate::error::Result;
use crate::tui::{self, App};

/// Run the browse command
pub fn run(args: BrowseArgs, config: &Config) -> Result<()> {
    let (root, tree) = load_tree(&args.load, config)?;

    let app = App::new(root, tree, navigator_config(&args.load, config))
        .with_load_options(load_options(&args.load, config))
        .with_indent(config.browser.indent);

    tui::run(app, Duration::from_millis(config.browser.tick_rate_ms))?;
    Ok(())
}
