use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{LevelFilter, debug};

use erdgen::{DanglingPolicy, GeneratorConfig, config, summary};

#[derive(Parser, Debug)]
#[command(
    name = "erdgen",
    version,
    about = "Generate a Quarkus JPA project from an entity-relationship diagram"
)]
struct Cli {
    /// Diagram source file
    input: PathBuf,

    /// Root directory of the generated project
    output: PathBuf,

    /// Base Java package, e.g. com.example.shop
    package: String,

    /// Configuration file (TOML); defaults to ./erdgen.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Template directory; missing templates are created with defaults
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Drop relations that reference undefined entities
    #[arg(long)]
    drop_dangling: bool,

    /// Print the parsed model instead of writing files
    #[arg(long)]
    dry_run: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(cli:?; "Parsed arguments");

    if let Err(e) = run(&cli) {
        eprintln!("ERROR: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> erdgen::Result<()> {
    let source = erdgen::read_source(&cli.input)?;

    let mut file_config = config::load_config(cli.config.as_deref(), Path::new("."))?;
    if let Some(dir) = &cli.templates {
        file_config.template_dir = Some(dir.clone());
    }
    if cli.drop_dangling {
        file_config.dangling = DanglingPolicy::Drop;
    }
    let generator_config = GeneratorConfig::new(&cli.package, &cli.output, file_config)?;

    let model = erdgen::parse_with_policy(&source, generator_config.dangling);
    if cli.dry_run {
        println!("{}", summary::render(&model));
        return Ok(());
    }

    let written = erdgen::generator::generate(&model, &generator_config)?;
    println!(
        "Project generated at: {} ({} files)",
        cli.output.display(),
        written.len()
    );
    Ok(())
}
