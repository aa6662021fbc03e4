//! gamesite CLI
//!
//! Command-line maintenance for a static HTML game catalog site.

mod cli_types;
mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rand::SeedableRng;
use rand::rngs::StdRng;

use gamesite_lib::Site;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!(
                "{} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let root = cli.root;
    let config = cli.config;

    match cli.command {
        Commands::Repair { args } => {
            let site = open_site(root, config)?;
            commands::repair::run_repair(&site, args.write.dry_run, args.seed)
        }
        Commands::Prune { write } => {
            let site = open_site(root, config)?;
            commands::repair::run_prune(&site, write.dry_run)
        }
        Commands::Featured { args } => {
            let site = open_site(root, config)?;
            commands::repair::run_featured(&site, args.write.dry_run, args.seed)
        }
        Commands::Categories { write } => {
            let site = open_site(root, config)?;
            commands::categories::run_categories(&site, write.dry_run)
        }
        Commands::RemovePopular { write } => {
            let site = open_site(root, config)?;
            commands::categories::run_remove_popular(&site, write.dry_run)
        }
        Commands::Reorganize { write, manifest } => {
            let site = open_site(root, config)?;
            commands::reorganize::run_reorganize(&site, write.dry_run, manifest)
        }
        Commands::HomeLinks { write } => {
            let site = open_site(root, config)?;
            commands::pages::run_home_links(&site, write.dry_run)
        }
        Commands::Classify { slugs } => {
            let site = open_site(root, config)?;
            commands::classify::run_classify(&site, &slugs);
            Ok(())
        }
        Commands::Catalog => {
            let site = open_site(root, config)?;
            commands::catalog::run_catalog(&site);
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(root, config),
            ConfigAction::SetRoot { path } => commands::config::run_config_set_root(&path),
            ConfigAction::ClearRoot => commands::config::run_config_clear_root(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}

/// Set up `env_logger`: plain messages by default, timestamps and debug
/// output with `--verbose`, warnings only with `--quiet`. `RUST_LOG` still
/// wins when set.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout);
    if !verbose {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.init();
}

fn open_site(root: Option<PathBuf>, config: Option<PathBuf>) -> Result<Site, CliError> {
    let root = gamesite_lib::settings::resolve_site_root(root);
    if !root.is_dir() {
        return Err(CliError::config(format!(
            "site root not found: {}",
            root.display()
        )));
    }
    log::debug!("Site root: {}", root.display());
    Ok(Site::open(root, config.as_deref())?)
}

/// Random source for the replacement fallback. Seeded runs are reproducible.
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

pub(crate) fn log_blank() {
    log::info!("");
}

pub(crate) fn log_dry_run(dry_run: bool) {
    if dry_run {
        log::info!(
            "{}",
            "Dry run: no files will be modified".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
