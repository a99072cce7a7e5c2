//! webpack-init CLI - Project scaffolding for webpack

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use init_core::tui::InitArgs;
use init_core::{PackageManager, ProfileKind};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "WEBPACK_INIT_LOG";

#[derive(Parser, Debug)]
#[command(name = "webpack-init")]
#[command(about = "CLI for scaffolding webpack projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new webpack project
    Init(CliInitArgs),
    /// List the available profiles
    List,
}

#[derive(Parser, Debug)]
pub struct CliInitArgs {
    /// Profile to generate (default, react)
    pub profile: Option<String>,

    /// Project directory to generate into
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Answer every prompt with its default (non-interactive mode)
    #[arg(short, long)]
    pub force: bool,

    /// YAML file with preset answers, keyed by answer name
    #[arg(short, long)]
    pub answers: Option<PathBuf>,

    /// Local directory with template overrides (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Record dependencies in package.json without installing them
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Package manager to install with (npm, yarn, pnpm)
    #[arg(long = "package-manager", value_parser = parse_package_manager)]
    pub package_manager: Option<PackageManager>,
}

fn parse_package_manager(name: &str) -> Result<PackageManager, String> {
    PackageManager::parse(name)
        .ok_or_else(|| format!("unknown package manager '{}' (use npm, yarn or pnpm)", name))
}

impl From<CliInitArgs> for InitArgs {
    fn from(args: CliInitArgs) -> Self {
        InitArgs {
            profile: args.profile,
            directory: args.directory,
            force: args.force,
            answers: args.answers,
            template_dir: args.template_dir,
            skip_install: args.skip_install,
            package_manager: args.package_manager,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn list_profiles() {
    println!("{}", "Available profiles".cyan().bold());
    println!();
    for kind in ProfileKind::ALL {
        let profile = kind.profile();
        println!(
            "  {} {:<10} {}",
            "->".blue(),
            profile.name().green(),
            profile.description().dimmed()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::List) => {
            list_profiles();
            Ok(())
        }
        Some(Command::Init(init_args)) => {
            let result = init_core::run(init_args.into()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        None => {
            // No subcommand provided, default to init behavior (interactive mode)
            let result = init_core::run(InitArgs::default()).await;

            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
