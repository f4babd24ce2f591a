//! `confmap` - render configuration documents as fingerprinted properties.
//!
//! ```text
//! confmap render connector.yaml --output application.properties
//! confmap fingerprint connector.yaml
//! confmap check connector.yaml --applied 9e107d9d372bb6826bd81d3542a419d6
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use confmap::runtime::{
    ConfigLoader, ConfmapConfig, Flattener, LoggingBuilder, Rendered, logging,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "confmap", version, about)]
struct Cli {
    /// Configuration file to load instead of the discovered ones.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Configuration profile (overrides `CONFMAP_PROFILE`).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Namespace prefix for every relative key.
    #[arg(long, global = true)]
    prefix: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the properties text, or write it with `--output`.
    Render {
        file: PathBuf,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the fingerprint of the rendered properties.
    Fingerprint { file: PathBuf },
    /// Exit non-zero when the rendered properties differ from the applied ones.
    Check {
        file: PathBuf,
        #[arg(long)]
        applied: String,
    },
}

fn load_config(cli: &Cli) -> Result<ConfmapConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(profile) = &cli.profile {
        loader = loader.profile(profile);
    }
    if let Some(path) = &cli.config {
        loader = loader.file(path);
    }
    if let Some(prefix) = &cli.prefix {
        loader = loader.set("flatten.prefix", prefix);
    }

    loader.load().context("failed to load configuration")
}

fn render(flattener: &Flattener, file: &Path) -> Result<Rendered> {
    flattener
        .flatten_file(file)
        .with_context(|| format!("failed to render {}", file.display()))
}

fn run(command: &Command, flattener: &Flattener) -> Result<ExitCode> {
    match command {
        Command::Render { file, output } => {
            let rendered = render(flattener, file)?;
            match output {
                Some(path) => rendered.write_to(path)?,
                None => println!("{}", rendered.properties),
            }
        }
        Command::Fingerprint { file } => {
            println!("{}", render(flattener, file)?.fingerprint);
        }
        Command::Check { file, applied } => {
            let rendered = render(flattener, file)?;
            if rendered.is_drifted(applied) {
                warn!(
                    applied = %applied,
                    current = %rendered.fingerprint,
                    "Configuration drifted"
                );
                println!("{}", rendered.fingerprint);
                return Ok(ExitCode::FAILURE);
            }
            info!(fingerprint = %rendered.fingerprint, "Configuration up to date");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Loader messages go to a default stderr subscriber until the
    // configured one can be installed.
    let bootstrap = LoggingBuilder::new().build();
    let config = tracing::dispatcher::with_default(&bootstrap, || load_config(&cli))?;
    logging::init_from_config(&config.logging);

    run(&cli.command, &Flattener::new(config.flatten))
}
