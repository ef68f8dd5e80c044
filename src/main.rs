use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use audit_config::{AuditConfig, LoadedConfig, OutputFormat, SearchPaths};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};

mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Inspect and validate audit.toml", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the effective configuration
    Show {
        #[command(flatten)]
        input: Input,
        /// Overrides `output.format` for this print
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },
    /// Validate the configuration, exiting non-zero on error
    Check {
        #[command(flatten)]
        input: Input,
    },
    /// Print the search locations and which one is in effect
    Locate {
        ///project directory, defaults to the current directory
        #[arg(short, long)]
        project_dir: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct Input {
    ///read this file instead of searching the project and user locations
    #[arg(long, conflicts_with = "project_dir")]
    file: Option<PathBuf>,
    ///project directory, defaults to the current directory
    #[arg(short, long)]
    project_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Terminal,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => Format::Terminal,
            OutputFormat::Json => Format::Json,
        }
    }
}

fn search_paths(project_dir: Option<&Path>) -> anyhow::Result<SearchPaths> {
    let project_dir = match project_dir {
        Some(dir) => dunce::canonicalize(dir)
            .with_context(|| format!("invalid project directory {}", dir.display()))?,
        None => std::env::current_dir().context("failed to read the current directory")?,
    };
    let paths = SearchPaths::for_project(project_dir);
    debug!("search paths {:?}", paths);
    Ok(paths)
}

// A file named with `--file` must exist; only the searched locations fall back to defaults.
fn load(input: &Input) -> anyhow::Result<LoadedConfig> {
    if let Some(file) = &input.file {
        return Ok(AuditConfig::load_explicit(file)?);
    }

    let paths = search_paths(input.project_dir.as_deref())?;
    Ok(AuditConfig::load_or_default(&paths)?)
}

fn show(input: &Input, format: Option<Format>) -> anyhow::Result<()> {
    let loaded = load(input)?;
    match format.unwrap_or_else(|| loaded.config.output.format.into()) {
        Format::Terminal => print!("{}", render::terminal(&loaded)),
        Format::Json => {
            let json = serde_json::to_string_pretty(&loaded.config)
                .context("failed to serialize configuration")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn check(input: &Input) -> anyhow::Result<()> {
    let loaded = load(input)?;
    for ignored in &loaded.ignored_keys {
        warn!("unknown key `{}` at {} is ignored", ignored.key, ignored.location);
    }
    match &loaded.path {
        Some(path) => println!("{}: ok", path.display()),
        None => println!("no configuration found, defaults apply"),
    }
    Ok(())
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Show { input, format } => show(&input, format),
        Command::Check { input } => check(&input),
        Command::Locate { project_dir } => {
            let paths = search_paths(project_dir.as_deref())?;
            print!("{}", render::locations(&paths));
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    //logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
