//! cfn-scaffold CLI
//!
//! Usage:
//!   cfn-scaffold build [OPTIONS] <TYPES>...
//!   cfn-scaffold tree [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Configuration file (TOML format)
//!   -v, --verbose        Increase log output (repeatable)
//!   -h, --help           Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cfn_scaffold::graph::extract;
use cfn_scaffold::spec::GENERAL_DOMAIN;
use cfn_scaffold::{
    render_document, render_dot, render_graph, BuildMode, Config, Document, Error, SortOrder,
    TemplateBuilder,
};

#[derive(Parser)]
#[command(name = "cfn-scaffold")]
#[command(about = "Template skeleton builder and dependency analyser")]
struct Cli {
    /// Configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a skeleton template for the given resource types
    Build {
        /// Resource type names, e.g. AWS::S3::Bucket
        #[arg(required_unless_present = "list")]
        types: Vec<String>,

        /// Only include required properties
        #[arg(short, long)]
        bare: bool,

        /// Output JSON instead of an annotated tree
        #[arg(short, long)]
        json: bool,

        /// List the known resource types and exit
        #[arg(short, long)]
        list: bool,
    },

    /// Show the dependencies between template entries
    Tree {
        /// JSON template (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Also list entries without dependencies
        #[arg(short, long)]
        all: bool,

        /// Also show which entries depend on each entry
        #[arg(short, long)]
        both: bool,

        /// Output Graphviz DOT instead of a tree
        #[arg(long)]
        dot: bool,

        /// Sort entries by name
        #[arg(short, long)]
        sorted: bool,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("cfn_scaffold=debug"),
        _ => EnvFilter::new("cfn_scaffold=trace"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Config::builtin(),
    };

    match run(cli.command, &config) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(command: Command, config: &Config) -> Result<String, Error> {
    match command {
        Command::Build {
            types,
            bare,
            json,
            list,
        } => {
            let catalog = config.load_catalog()?;
            if list {
                return Ok(catalog.list_resource_type_names(GENERAL_DOMAIN).join("\n"));
            }

            let mode = if bare { BuildMode::Bare } else { config.build.mode };
            let mut builder = TemplateBuilder::new(&catalog).with_overrides(config.override_set());
            if let Some(description) = &config.build.description {
                builder = builder.with_description(description.clone());
            }
            let template = builder.build(&types, mode)?;

            if json {
                Ok(template.document.to_json_string_pretty()?)
            } else {
                Ok(render_document(&template.document, &config.render_config()))
            }
        }
        Command::Tree {
            file,
            all,
            both,
            dot,
            sorted,
        } => {
            let source = read_input(file.as_deref())?;
            let doc = Document::from_json_str(&source)?;
            let graph = extract(&doc);

            let mut render = config.render_config();
            render.show_all |= all;
            render.show_dependents |= both;
            if sorted {
                render = render.with_order(SortOrder::Sorted);
            }

            if dot {
                Ok(render_dot(&graph, &render))
            } else {
                Ok(render_graph(&graph, &render))
            }
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String, Error> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| Error::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(buffer)
        }
    }
}
