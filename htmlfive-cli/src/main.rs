//! htmlfive CLI
//!
//! Parses an HTML document and prints it back in one of several forms.
//!
//! - htmlfive page.html                  # Normalized HTML
//! - htmlfive --format preview page.html # Escaped, colored HTML
//! - htmlfive --format tokens --html '<p>Hi</p>'

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use htmlfive_html::{
    Document, FormatterOptions, HTMLExporter, HTMLFormatter, HTMLTokenizer, NodeId, NodeType,
    parse_document, print_tree,
};
use owo_colors::OwoColorize;
use serde_json::{Map, Value, json};

/// htmlfive: parse, export and preview restricted HTML5 documents
#[derive(Parser, Debug)]
#[command(name = "htmlfive")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Re-indent a document
    htmlfive ./index.html

    # Escaped, syntax-colored HTML for embedding in a page
    htmlfive --format preview ./index.html

    # Show the token stream of an inline snippet
    htmlfive --format tokens --html '<p class=a>Hi<br></p>'

    # Preview with custom colors
    htmlfive --format preview --style-config styles.json ./index.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE", required_unless_present = "html")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Export)]
    format: OutputFormat,

    /// Spaces per nesting level (export and preview)
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Line length after which preview wraps attributes
    #[arg(long, value_name = "N")]
    line_limit: Option<usize>,

    /// JSON file with formatter options for preview
    #[arg(long, value_name = "FILE")]
    style_config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Normalized, indented HTML
    Export,
    /// Escaped HTML with inline colors
    Preview,
    /// One token per line
    Tokens,
    /// Indented outline of the document tree
    Tree,
    /// The document tree as JSON
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let html = load_html(cli)?;
    let parse = || parse_document(&html).context("parsing input");

    let output = match cli.format {
        OutputFormat::Export => {
            let mut exporter = HTMLExporter::new();
            if let Some(indent) = cli.indent {
                exporter = exporter.with_indent_width(indent);
            }
            exporter.export(&parse()?)
        }
        OutputFormat::Preview => HTMLFormatter::new(formatter_options(cli)?).format(&parse()?),
        OutputFormat::Tokens => {
            let mut lines = Vec::new();
            for token in HTMLTokenizer::new(&html) {
                lines.push(token.context("tokenizing input")?.to_string());
            }
            lines.join("\n")
        }
        OutputFormat::Tree => {
            let doc = parse()?;
            print_tree(&doc, doc.root(), 0).trim_end().to_string()
        }
        OutputFormat::Json => {
            let doc = parse()?;
            serde_json::to_string_pretty(&node_to_json(&doc, doc.root()))
                .context("serializing document")?
        }
    };
    Ok(output)
}

/// Load HTML from `--html` or the file argument
fn load_html(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        return Ok(html.clone());
    }
    let Some(ref path) = cli.path else {
        anyhow::bail!("a file path or --html is required");
    };
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn formatter_options(cli: &Cli) -> Result<FormatterOptions> {
    let mut options = match cli.style_config {
        Some(ref path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing formatter options in {}", path.display()))?
        }
        None => FormatterOptions::default(),
    };
    if let Some(indent) = cli.indent {
        options = options.with_indent_spaces(indent);
    }
    if let Some(limit) = cli.line_limit {
        options = options.with_line_limit(limit);
    }
    Ok(options)
}

fn node_to_json(doc: &Document, id: NodeId) -> Value {
    let Some(node) = doc.get(id) else {
        return Value::Null;
    };
    match &node.node_type {
        NodeType::Element(data) => {
            let attributes: Map<String, Value> = data
                .attrs
                .iter()
                .map(|(name, value)| (name.clone(), value.clone().map_or(Value::Null, Value::String)))
                .collect();
            let children: Vec<Value> = doc
                .children(id)
                .iter()
                .map(|&child| node_to_json(doc, child))
                .collect();
            json!({
                "type": "element",
                "tagName": data.tag_name,
                "attributes": attributes,
                "children": children,
            })
        }
        NodeType::Text(text) => json!({ "type": "text", "content": text }),
        NodeType::Comment(text) => json!({ "type": "comment", "content": text }),
    }
}
