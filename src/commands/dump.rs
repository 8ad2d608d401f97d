//! Dump command implementation

use serde::Serialize;

use super::{load_tree, navigator_config};
use crate::cli::DumpArgs;
use crate::config::Config;
use crate::error::{GroveError, Result};
use crate::hierarchy::{NodeId, NodeTree};
use crate::navigator::TreeNavigator;

/// One visible row of the outline, as emitted with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineRow {
    pub path: String,
    pub label: String,
    pub depth: usize,
    pub expanded: bool,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Run the dump command
pub fn run(args: DumpArgs, config: &Config) -> Result<()> {
    let (root, mut tree) = load_tree(&args.load, config)?;
    if args.expand_all {
        tree.expand_all();
    }

    let mut navigator = TreeNavigator::with_config(navigator_config(&args.load, config));
    let targets = args
        .select
        .iter()
        .map(|rel| resolve(&tree, rel).ok_or_else(|| GroveError::PathNotFound(root.join(rel))))
        .collect::<Result<Vec<_>>>()?;
    navigator.select_many(&mut tree, &targets)?;

    let output = if args.json {
        serde_json::to_string_pretty(&outline_rows(&tree, &navigator))?
    } else {
        format_outline(&tree, &navigator)
    };
    println!("{}", output);

    Ok(())
}

/// Find a node by a `/`-separated path relative to the root.
pub fn resolve(tree: &NodeTree, rel: &str) -> Option<NodeId> {
    let labels: Vec<&str> = rel.split('/').filter(|part| !part.is_empty()).collect();
    tree.find_relative(&labels)
}

pub fn outline_rows(tree: &NodeTree, navigator: &TreeNavigator) -> Vec<OutlineRow> {
    tree.visible_rows()
        .map(|row| OutlineRow {
            path: tree.relative_path(row.id).unwrap_or_default(),
            label: row.label.to_string(),
            depth: row.depth,
            expanded: row.is_expanded,
            selected: navigator.is_selected(row.id),
            detail: row.detail.map(str::to_string),
        })
        .collect()
}

/// Visible rows with tree glyphs; selected rows are marked with `*`.
pub fn format_outline(tree: &NodeTree, navigator: &TreeNavigator) -> String {
    let mut output = String::new();

    for row in tree.visible_rows() {
        let marker = if navigator.is_selected(row.id) { '*' } else { ' ' };
        let icon = match (row.has_children, row.is_expanded) {
            (true, true) => "▼ ",
            (true, false) => "► ",
            (false, _) => "  ",
        };
        output.push(marker);
        output.push(' ');
        output.push_str(&"  ".repeat(row.depth));
        output.push_str(icon);
        output.push_str(row.label);
        if let Some(detail) = row.detail {
            output.push_str(&format!("  ({})", detail));
        }
        output.push('\n');
    }

    output.truncate(output.trim_end().len());
    output
}
