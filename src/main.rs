//! Wall Designer CLI
//!
//! Usage:
//!   wall-designer [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>   Design defaults (TOML format)
//!   -n, --new             Start from an empty design instead of reading input
//!   -a, --add <KIND>      Append a default element (repeatable)
//!   -p, --plan            Measure in the plan view
//!   -g, --gaps            Print spacing between neighboring elements
//!   -s, --summary         Print wall and niche areas
//!   -o, --output <FILE>   Write the resolved document
//!   -d, --debug           Dump the resolved tree to stderr
//!   -h, --help            Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use wall_designer::layout::compute_gaps;
use wall_designer::report::{gaps_table, positions_table, summary_text, tree_dump};
use wall_designer::{Design, DesignConfig, DesignError, ElementKind, ViewType};

#[derive(Parser)]
#[command(name = "wall-designer")]
#[command(about = "Resolve and measure wall niche layouts")]
struct Cli {
    /// Design document (reads JSON from stdin if not provided)
    input: Option<PathBuf>,

    /// Design defaults (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from an empty design instead of reading input
    #[arg(short, long)]
    new: bool,

    /// Append a default element of this kind (wall, niche, shelf, tv-recess, fireplace, custom)
    #[arg(short, long, value_name = "KIND")]
    add: Vec<String>,

    /// Measure in the plan view
    #[arg(short, long)]
    plan: bool,

    /// Print spacing between neighboring elements
    #[arg(short, long)]
    gaps: bool,

    /// Print wall and niche areas
    #[arg(short, long)]
    summary: bool,

    /// Write the resolved document to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dump the resolved tree to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Nothing to read and nothing to build: show a short intro
    if cli.input.is_none() && !cli.new && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), DesignError> {
    let config = match &cli.config {
        Some(path) => DesignConfig::from_file(path)?,
        None => DesignConfig::default(),
    };

    let mut design = Design::with_config(&config);
    if !cli.new {
        let (source, filename) = read_input(cli)?;
        if let Err(e) = design.load_json(&source) {
            eprint!("{}", e.format(&source, &filename));
            return Err(e.into());
        }
    }

    for keyword in &cli.add {
        let kind = ElementKind::from_keyword(keyword)
            .ok_or_else(|| DesignError::UnknownKind(keyword.clone()))?;
        design.add(kind, None);
    }

    if cli.plan {
        design.set_view(ViewType::Plan);
    }

    if cli.debug {
        eprint!("{}", tree_dump(&design));
        for dangling in design.dangling_references() {
            eprintln!(
                "{} refers to missing element {}",
                dangling.element, dangling.missing
            );
        }
    }

    println!("{}", positions_table(&design));

    if cli.gaps {
        // An explicit request ignores the canvas display toggle
        let gaps = compute_gaps(
            &design.tree().flatten(),
            design.view(),
            design.layout_config(),
        );
        println!();
        println!("{}", gaps_table(&gaps));
    }

    if cli.summary {
        println!();
        println!("{}", summary_text(&design.summary()));
    }

    if let Some(path) = &cli.output {
        design.save(path)?;
    }

    Ok(())
}

fn read_input(cli: &Cli) -> Result<(String, String), DesignError> {
    let loaded = match &cli.input {
        Some(path) => (
            fs::read_to_string(path).map_err(wall_designer::DocumentError::from)?,
            path.display().to_string(),
        ),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(wall_designer::DocumentError::from)?;
            (buffer, "<stdin>".to_string())
        }
    };
    Ok(loaded)
}

fn print_intro() {
    println!(
        r#"wall-designer - resolve and measure wall niche layouts

Pass a design document, pipe one on stdin, or start fresh:

  wall-designer design.json --gaps --summary
  wall-designer --new --add wall --add niche --add shelf -o design.json

Run with --help for all options."#
    );
}
