//! Widget Codegen CLI
//!
//! Usage:
//!   widget-codegen [OPTIONS] --design <FILE> --output <FILE>
//!
//! Options:
//!   -d, --design <FILE>     Design manifest (TOML)
//!   -o, --output <FILE>     Generated source file, regenerated in place
//!   -c, --config <FILE>     Project config (TOML)
//!   -t, --templates <FILE>  Template catalog overriding the built-in one
//!   -s, --skeleton <FILE>   Skeleton used when the output does not exist
//!   --backup                Keep <output>.bak
//!   --dry-run               Print the result instead of writing it
//!   --list-templates        Print the available template names
//!   -v, --verbose           More logging (repeatable)
//!   -h, --help              Print help

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::Level;

use widget_codegen::codegen::generator::load_source;
use widget_codegen::{CodegenConfig, Design, GenerateError, Generator, OutputOptions};

#[derive(Parser)]
#[command(name = "widget-codegen")]
#[command(about = "Round-trip code generation for embedded GUI widgets")]
struct Cli {
    /// Design manifest (TOML)
    #[arg(short, long, required_unless_present = "list_templates")]
    design: Option<PathBuf>,

    /// Generated source file; read back as the previous output if it exists
    #[arg(short, long, required_unless_present = "list_templates")]
    output: Option<PathBuf>,

    /// Project config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Template catalog whose entries override the built-in ones
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Project skeleton for the first generation
    #[arg(short, long)]
    skeleton: Option<PathBuf>,

    /// Keep a copy of the previous output as <output>.bak
    #[arg(long)]
    backup: bool,

    /// Print the generated text to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Print the names of all available templates and exit
    #[arg(long)]
    list_templates: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Config file first, then command-line overrides
    let mut config = match &cli.config {
        Some(path) => match CodegenConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => CodegenConfig::default(),
    };
    if let Some(path) = &cli.templates {
        config = config.with_catalog(path);
    }
    if let Some(path) = &cli.skeleton {
        config = config.with_skeleton(path);
    }
    if cli.backup {
        config = config.with_backup(true);
    }

    let store = match config.load_store() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading templates: {}", e);
            std::process::exit(1);
        }
    };

    if cli.list_templates {
        for name in store.names() {
            println!("{}", name);
        }
        return;
    }

    // clap enforces both when --list-templates is absent
    let (Some(design_path), Some(output)) = (&cli.design, &cli.output) else {
        eprintln!("Error: --design and --output are required");
        std::process::exit(1);
    };

    let design = match Design::from_file(design_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error loading design '{}': {}", design_path.display(), e);
            std::process::exit(1);
        }
    };

    let options = OutputOptions::default()
        .with_backup(config.backup)
        .with_dry_run(cli.dry_run);
    let generated = match Generator::new(&store, &design).generate_file(
        output,
        config.skeleton.as_deref(),
        options,
    ) {
        Ok(g) => g,
        Err(GenerateError::Tag(e)) => {
            // reread the input the markers were checked against for the report
            match load_source(output, config.skeleton.as_deref()) {
                Ok(source) => eprint!("{}", e.format(&source, &output.display().to_string())),
                Err(_) => eprintln!("Error: {}", e),
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.dry_run {
        print!("{}", generated.text);
    }

    for warning in &generated.warnings {
        eprintln!("warning: {}", warning);
    }
}
