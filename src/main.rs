//! geotruth CLI
//!
//! Usage:
//!   geotruth [OPTIONS] [FILE]
//!
//! Options:
//!   -f, --format <FORMAT>    Output format: svg (default) or json
//!   -s, --stylesheet <FILE>  Stylesheet file for color palette (TOML format)
//!   -l, --lint               Report residual label overlaps and off-canvas geometry
//!   -d, --debug              Print the assembled group tree to stderr
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use geotruth::{
    build_scene, render_svg_with_stylesheet, RenderConfig, RenderError, SceneFormat, Stylesheet,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

#[derive(Parser)]
#[command(name = "geotruth")]
#[command(about = "Exact vector ground truth for geometric illustrations")]
struct Cli {
    /// Scene file, TOML or JSON (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "svg")]
    format: OutputFormat,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Report residual label overlaps and off-canvas geometry on stderr
    #[arg(short, long)]
    lint: bool,

    /// Debug mode: print the assembled group tree to stderr
    #[arg(short, long)]
    debug: bool,
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    #[cfg(feature = "tracing")]
    init_tracing();

    // Load stylesheet
    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
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

    let mut config = RenderConfig::new()
        .with_stylesheet(stylesheet)
        .with_debug(cli.debug);
    if let Some(path) = &cli.input {
        config = config.with_format(SceneFormat::from_path(path));
    }

    let scene = match build_scene(&source, &config) {
        Ok(scene) => scene,
        Err(RenderError::Spec(e)) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.lint {
        for warning in geotruth::layout::lint::check(&scene, &config.layout) {
            eprintln!("warning: {}", warning);
        }
    }

    match cli.format {
        OutputFormat::Svg => {
            println!(
                "{}",
                render_svg_with_stylesheet(&scene, &config.svg, &config.stylesheet)
            );
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&scene) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}
