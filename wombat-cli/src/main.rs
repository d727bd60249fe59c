//! Wombat parser CLI
//!
//! A headless front end for the parser core: parse a file or an inline
//! string, dump the document tree, and list any parse errors.

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use serde_json::{json, Value};
use wombat_dom::{DomTree, NodeId};
use wombat_html::print_tree;

#[derive(Parser)]
#[command(name = "wombat", about = "Parse HTML and dump the document tree")]
struct Args {
    /// Path to an HTML file to parse.
    #[arg(required_unless_present = "html")]
    file: Option<String>,

    /// Parse an inline HTML string instead of a file.
    #[arg(long)]
    html: Option<String>,

    /// Dump the tree as JSON instead of indented text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = match (&args.html, &args.file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
        }
        (None, None) => unreachable!("clap enforces one input source"),
    };

    let outcome = wombat_html::parse(&input).context("parser driver contract violated")?;

    if args.json {
        let value = tree_to_json(&outcome.tree, outcome.tree.root());
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("=== Document Tree ===");
        print_tree(&outcome.tree);
    }

    if !outcome.errors.is_empty() {
        eprintln!(
            "{}",
            format!("{} parse error(s):", outcome.errors.len()).yellow()
        );
        for error in &outcome.errors {
            eprintln!("  {error}");
        }
    }

    // Recoverable parse errors never fail the process.
    Ok(())
}

/// Serialize a subtree to JSON: elements carry name, attributes, text, and
/// children; the document root carries its doctype name and children.
fn tree_to_json(tree: &DomTree, id: NodeId) -> Value {
    let children: Vec<Value> = tree
        .children(id)
        .iter()
        .map(|&child| tree_to_json(tree, child))
        .collect();

    match tree.as_element(id) {
        Some(element) => {
            let attrs: serde_json::Map<String, Value> = element
                .attributes()
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            json!({
                "name": element.name,
                "attributes": attrs,
                "text": element.text,
                "suppress_display": element.suppress_display,
                "children": children,
            })
        }
        None => json!({
            "document": true,
            "doctype": tree.doctype_name(),
            "children": children,
        }),
    }
}
