//! TikZ Grapher CLI
//!
//! Usage:
//!   tikz-grapher [OPTIONS] [FILE]
//!
//! Options:
//!   -f, --format <FORMAT>    Matrix format: csv, python or mathematica
//!   -c, --config <FILE>      Options file (TOML format)
//!   -s, --set <KEY=VALUE>    Set one option, e.g. nodestyle.fill_color=white
//!   -d, --document           Wrap the drawing in a standalone document
//!   -t, --tree <LEAVES>      Read leaf splits and draw the phylogenetic tree
//!   --options                List every option with its default
//!   -v, --verbose            Log progress to stderr
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tikz_grapher::config::all_options;
use tikz_grapher::{
    draw, draw_tree, parse_splits, Drawing, MatrixError, MatrixFormat, PhylogeneticTree,
    RenderConfig, RenderError,
};

#[derive(Parser)]
#[command(name = "tikz-grapher")]
#[command(about = "Draw graphs given as adjacency matrices with TikZ")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Matrix format: csv, python or mathematica
    #[arg(short, long, default_value = "csv")]
    format: MatrixFormat,

    /// Options file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set one option, applied after the options file
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    set: Vec<(String, String)>,

    /// Print a standalone LaTeX document instead of a bare picture
    #[arg(short, long)]
    document: bool,

    /// Treat the input as leaf splits of a tree with this many leaves
    #[arg(short, long, value_name = "LEAVES")]
    tree: Option<usize>,

    /// List every option with its default
    #[arg(long)]
    options: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.options {
        print_options();
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let result = match cli.tree {
        Some(leaves) => draw_splits(&source, leaves, &config),
        None => draw(&source, &config),
    };

    match result {
        Ok(drawing) if cli.document => print!("{}", drawing.document()),
        Ok(drawing) => print!("{}", drawing.body()),
        Err(RenderError::Matrix(MatrixError::Format(errors))) => {
            for error in &errors {
                eprint!("{}", error.format(&source, &filename));
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> Result<RenderConfig, RenderError> {
    let mut config = RenderConfig::new().with_format(cli.format);
    if let Some(path) = &cli.config {
        debug!(path = %path.display(), "loading options file");
        config.apply_toml_file(path)?;
    }
    config.set_options(cli.set.iter().map(|(k, v)| (k, v)))?;
    Ok(config)
}

fn draw_splits(source: &str, leaves: usize, config: &RenderConfig) -> Result<Drawing, RenderError> {
    let splits = parse_splits(source)?;
    let tree = PhylogeneticTree::new(&splits, leaves)?;
    debug!(
        leaves,
        splits = splits.len(),
        nodes = tree.node_count(),
        "built tree"
    );
    draw_tree(&tree, config)
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

fn print_options() {
    println!("{:<32} DEFAULT", "OPTION");
    for (key, option) in all_options() {
        println!("{:<32} {:<8} {}", key, option.default, option.description);
    }
}

fn print_intro() {
    println!(
        r#"TikZ Grapher - draw graphs given as adjacency matrices with TikZ

USAGE:
    tikz-grapher [OPTIONS] [FILE]
    echo '<matrix>' | tikz-grapher

OPTIONS:
    -f, --format       Matrix format: csv (default), python, mathematica
    -c, --config       Options file (TOML with [layout], [nodestyle], [linestyle])
    -s, --set          Set one option: -s labels=numbered -s linestyle.directed=false
    -d, --document     Print a standalone LaTeX document
    -t, --tree         Read leaf splits, one per line, and draw the tree
    --options          List every option with its default
    -v, --verbose      Log progress to stderr
    -h, --help         Print help

QUICK START:
    printf '0,1,1\n1,0,1\n1,1,0\n' | tikz-grapher -d > triangle.tex

This lays out a triangle with arrows in both directions on every edge.
The same matrix always produces the same drawing."#
    );
}
