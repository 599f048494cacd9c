//! Sprig CLI
//!
//! Builds a document tree from a JSON description and prints its markup.

mod blueprint;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use sprig_common::warning::recorded_warnings;
use sprig_dom::{BehaviorMap, DocumentKind, DomTree, NamedBehavior, SerializeOptions, VoidStyle};

use blueprint::Blueprint;

/// Sprig: print the markup of a JSON-described document tree
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Serialize a tree stored in a file
    sprig tree.json

    # Serialize an inline description
    sprig --json '{"type": "element", "tag": "p", "children": ["a < b"]}'

    # Print only the children of the top node
    sprig --inner tree.json

    # XML document: foreign namespaces are declared with xmlns
    sprig --xml --self-closing tree.json

    # Register a customized built-in so it is not reported as unknown
    sprig --define fancy-button:button tree.json
"#)]
struct Cli {
    /// Path to a JSON tree description
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Read the JSON tree description from this argument instead of a file
    #[arg(long, value_name = "JSON", alias = "html")]
    json: Option<String>,

    /// Build the tree in an XML document instead of an HTML document
    #[arg(long)]
    xml: bool,

    /// Close void elements XML-style (`<br />`)
    #[arg(long)]
    self_closing: bool,

    /// Print innerHTML of the top node instead of outerHTML
    #[arg(long)]
    inner: bool,

    /// Register an element behavior (`name` or `name:extends`)
    #[arg(long = "define", value_name = "NAME[:EXTENDS]")]
    define: Vec<String>,

    /// Fail if building the tree reported any warning
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(markup) => {
            println!("{markup}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let source = load_source(cli)?;
    let blueprint = Blueprint::from_json(&source)?;

    let kind = if cli.xml {
        DocumentKind::Xml
    } else {
        DocumentKind::Html
    };
    let options = SerializeOptions {
        void_style: if cli.self_closing {
            VoidStyle::Xml
        } else {
            VoidStyle::Html
        },
    };

    let registry = registry_from(&cli.define);
    let mut tree = DomTree::with_kind(kind);
    let top = blueprint.build(&mut tree, &registry)?;

    if cli.strict {
        let warnings = recorded_warnings();
        if !warnings.is_empty() {
            bail!("{} warning(s) reported: {}", warnings.len(), warnings.join("; "));
        }
    }

    let markup = if cli.inner {
        tree.inner_html_with(top, options)?
    } else {
        tree.outer_html_with(top, options)?
    };
    Ok(markup)
}

/// Load the description from `--json` or the positional path.
fn load_source(cli: &Cli) -> Result<String> {
    if let Some(ref json) = cli.json {
        Ok(json.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
    } else {
        bail!("no input: pass a FILE or --json '<json>'")
    }
}

fn registry_from(definitions: &[String]) -> BehaviorMap {
    let mut registry = BehaviorMap::new();
    for definition in definitions {
        let behavior = match definition.split_once(':') {
            Some((name, extends)) => NamedBehavior::customized(name, extends),
            None => NamedBehavior::autonomous(definition.as_str()),
        };
        let _ = registry.insert(Rc::new(behavior));
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    const ELEMENT: &str = r#"{"type": "element", "tag": "p", "children": ["a < b"]}"#;

    #[test]
    fn test_json_flag_and_html_alias() {
        let cli = Cli::try_parse_from(["sprig", "--json", ELEMENT]).unwrap();
        assert_eq!(cli.json.as_deref(), Some(ELEMENT));
        assert_eq!(run(&cli).unwrap(), "<p>a &lt; b</p>");

        let cli = Cli::try_parse_from(["sprig", "--html", ELEMENT]).unwrap();
        assert_eq!(cli.json.as_deref(), Some(ELEMENT));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let cli = Cli::try_parse_from(["sprig"]).unwrap();
        assert!(run(&cli).is_err());
    }
}
