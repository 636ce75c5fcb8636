//! kubeyaml - rewrite one manifest in a YAML stream read from stdin.

use std::io::{self, BufWriter, Read};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kubeyaml::{
    rewrite_stream, ContainerSelector, Error, Operation, Selector, SetPaths, UpdateAnnotations,
    UpdateImage,
};

/// Exit status for a manifest that is missing or cannot be rewritten.
const REWRITE_FAILURE: u8 = 2;
/// Exit status for unreadable input or unwritable output.
const IO_FAILURE: u8 = 1;

#[derive(Debug, Parser)]
#[command(version, about = "Rewrite one Kubernetes manifest in a YAML stream")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Update an image ref
    Image {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        container: String,
        #[arg(long)]
        image: String,
    },
    /// Update annotations; an empty value removes the annotation
    Annotate {
        #[command(flatten)]
        target: Target,
        #[arg(required = true, value_name = "KEY=VALUE", value_parser = parse_key_value)]
        notes: Vec<(String, String)>,
    },
    /// Update values by their dot notation paths
    Set {
        #[command(flatten)]
        target: Target,
        #[arg(required = true, value_name = "PATH=VALUE", value_parser = parse_key_value)]
        paths: Vec<(String, String)>,
    },
}

#[derive(Debug, Args)]
struct Target {
    #[arg(long)]
    namespace: String,
    #[arg(long)]
    kind: String,
    #[arg(long)]
    name: String,
}

impl From<Target> for Selector {
    fn from(t: Target) -> Self {
        Selector::new(t.namespace, t.kind, t.name)
    }
}

impl From<Command> for Operation {
    fn from(command: Command) -> Self {
        match command {
            Command::Image {
                target,
                container,
                image,
            } => UpdateImage::new(ContainerSelector::new(target.into(), container), image).into(),
            Command::Annotate { target, notes } => {
                UpdateAnnotations::new(target.into(), notes).into()
            }
            Command::Set { target, paths } => SetPaths::new(target.into(), paths).into(),
        }
    }
}

/// Splits `key=value` on the first `=`. The value may be empty.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", s))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "kubeyaml=error".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli.command.into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let (status, diagnostic) = report(&e);
            eprintln!("{}", diagnostic);
            ExitCode::from(status)
        }
    }
}

/// Maps a failed run to its exit status and stderr diagnostic.
fn report(e: &Error) -> (u8, String) {
    if e.is_rewrite_failure() {
        (REWRITE_FAILURE, e.to_string())
    } else {
        (IO_FAILURE, format!("Error: {}", e))
    }
}

fn run(operation: Operation) -> Result<(), Error> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let stdout = io::stdout();
    rewrite_stream(&input, operation, BufWriter::new(stdout.lock()))
}
