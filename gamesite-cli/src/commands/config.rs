use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamesite_lib::settings::{
    SITE_CONFIG_FILE, SiteConfig, load_settings_string, resolve_site_root, save_site_root,
    settings_path,
};

use crate::CliError;

/// Show the settings file, the resolved site root and the effective site config.
pub(crate) fn run_config_show(
    root: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<(), CliError> {
    log::info!(
        "{}",
        "gamesite Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    let path = settings_path();
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
        if let Some(contents) = load_settings_string() {
            for line in contents.lines() {
                log::info!("    {}", line);
            }
        }
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let root = resolve_site_root(root);
    log::info!(
        "  Site root: {}",
        root.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    let source = match &config {
        Some(p) => p.display().to_string(),
        None if root.join(SITE_CONFIG_FILE).is_file() => {
            root.join(SITE_CONFIG_FILE).display().to_string()
        }
        None => "defaults".to_string(),
    };
    let site_config = SiteConfig::load(&root, config.as_deref())?;
    crate::log_blank();
    log::info!(
        "  Site config: {}",
        source.if_supports_color(Stdout, |t| t.dimmed()),
    );
    let fields = [
        ("games_dir", site_config.games_dir.clone()),
        ("index_file", site_config.index_file.clone()),
        ("page_extension", site_config.page_extension.clone()),
        ("page_size", site_config.page_size.to_string()),
    ];
    for (name, value) in fields {
        log::info!(
            "    {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value,
        );
    }

    let classifier = site_config.classifier.build();
    log::info!(
        "    {} {} keywords, default {}",
        "classifier:".if_supports_color(Stdout, |t| t.cyan()),
        classifier.keywords().len(),
        classifier.default_category(),
    );
    Ok(())
}

/// Save a default site root.
pub(crate) fn run_config_set_root(path: &Path) -> Result<(), CliError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    if !absolute.is_dir() {
        return Err(CliError::config(format!(
            "not a directory: {}",
            absolute.display()
        )));
    }
    save_site_root(Some(&absolute))?;
    log::info!(
        "{} Default site root set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        absolute.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Remove the saved default site root.
pub(crate) fn run_config_clear_root() -> Result<(), CliError> {
    save_site_root(None)?;
    log::info!(
        "{} Default site root cleared",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
