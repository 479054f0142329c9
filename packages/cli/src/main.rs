mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, init, precompile, registry, tree, ApplyArgs, InitArgs, PrecompileArgs, RegistryArgs,
    TreeArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - inspect and edit page component trees
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor operations (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default pagecraft.config.json
    Init(InitArgs),

    /// Print a page's component tree
    Tree(TreeArgs),

    /// Replay a list of mutations against a page
    Apply(ApplyArgs),

    /// Attach precompiled style classes to every component
    Precompile(PrecompileArgs),

    /// List the registered component types
    Registry(RegistryArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Tree(args) => tree(args, &cwd),
                Command::Apply(args) => apply(args, &cwd),
                Command::Precompile(args) => precompile(args, &cwd),
                Command::Registry(args) => registry(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
