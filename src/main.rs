//! Site Locale - translation layer for static sites
//!
//! Entry point for the host binary. Handles CLI argument parsing, logging
//! initialization, and runs the page-ready pipeline against a page snapshot.

use anyhow::Context;
use site_locale::config::Config;
use site_locale::document::PageDocument;
use site_locale::i18n::{CatalogSource, FileSource, HttpSource};
use site_locale::state::{open_storage, LocaleSession};
use std::path::PathBuf;

/// Application name for logging
const APP_NAME: &str = "site-locale";

/// Command line flags
#[derive(Debug, Default)]
struct Flags {
    page: Option<PathBuf>,
    catalog: Option<String>,
    base_url: Option<String>,
    browser_locale: Option<String>,
    select: Option<String>,
    storage_dir: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging();

    log::info!("Starting Site Locale");

    let flags = parse_args();
    let Some(page_path) = flags.page.clone() else {
        eprintln!("Error: a page snapshot is required");
        eprintln!("Use --help for usage information");
        std::process::exit(1);
    };

    let config = build_config(&flags);

    let page = PageDocument::load(&page_path)
        .with_context(|| format!("loading page {}", page_path.display()))?;

    let browser_locale = flags
        .browser_locale
        .clone()
        .or_else(sys_locale::get_locale)
        .unwrap_or_default();
    log::debug!("Browser locale: {:?}", browser_locale);

    let storage = open_storage(&config);

    let source: Box<dyn CatalogSource + Send + Sync> = match &config.base_url {
        Some(base) => Box::new(
            HttpSource::new(base, &config.catalog_location).context("building catalog URL")?,
        ),
        None => Box::new(FileSource::relative_to_page(
            &page_path,
            &config.catalog_location,
        )),
    };

    let mut session =
        LocaleSession::start(&config, source.as_ref(), page, storage, &browser_locale).await;

    if let Some(locale) = &flags.select {
        session.on_language_change(locale);
    }

    let locales = session.available_locales();
    let mut page = session.into_target();
    if let Some(switcher) = &mut page.language_switcher {
        if switcher.options.is_empty() {
            switcher.options = locales;
        }
    }

    match &flags.output {
        Some(path) => page
            .save(path)
            .with_context(|| format!("writing page {}", path.display()))?,
        None => println!("{}", page.to_json().context("serializing page")?),
    }

    Ok(())
}

/// Initialize the logging system
fn init_logging() {
    // Set default log level if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,site_locale=debug");
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();
}

/// Load the config file and apply command line overrides
fn build_config(flags: &Flags) -> Config {
    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("{}; using default configuration", e);
        Config::default()
    });

    if let Some(catalog) = &flags.catalog {
        config.catalog_location = catalog.clone();
    }
    if let Some(base_url) = &flags.base_url {
        config.base_url = Some(base_url.clone());
    }
    if let Some(dir) = &flags.storage_dir {
        config.storage_dir = Some(dir.clone());
    }

    config
}

/// Parse command line arguments
fn parse_args() -> Flags {
    let args: Vec<String> = std::env::args().collect();
    let mut flags = Flags::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            option @ ("-c" | "--catalog" | "-u" | "--base-url" | "-b" | "--browser-locale"
            | "-s" | "--select" | "-d" | "--storage-dir" | "-o" | "--output") => {
                let Some(value) = args.get(i + 1).cloned() else {
                    eprintln!("Error: {} requires an argument", option);
                    std::process::exit(1);
                };
                match option {
                    "-c" | "--catalog" => flags.catalog = Some(value),
                    "-u" | "--base-url" => flags.base_url = Some(value),
                    "-b" | "--browser-locale" => flags.browser_locale = Some(value),
                    "-s" | "--select" => flags.select = Some(value),
                    "-d" | "--storage-dir" => flags.storage_dir = Some(PathBuf::from(value)),
                    _ => flags.output = Some(PathBuf::from(value)),
                }
                i += 1;
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
            path => {
                if flags.page.is_some() {
                    eprintln!("Error: only one page snapshot may be given");
                    std::process::exit(1);
                }
                flags.page = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    flags
}

/// Print help message
fn print_help() {
    println!(
        r#"Site Locale - translation layer for static sites

USAGE:
    site-locale [OPTIONS] PAGE.json

OPTIONS:
    -h, --help                  Show this help message
    -v, --version               Show version information
    -c, --catalog LOCATION      Catalog location relative to the page (default: translations.json)
    -u, --base-url URL          Fetch the catalog over HTTP relative to URL
    -b, --browser-locale TAG    Browser locale to resolve against (default: system locale)
    -s, --select LOCALE         Select a language as the user would, then persist it
    -d, --storage-dir DIR       Directory holding the saved language preference
    -o, --output FILE           Write the rendered page to FILE instead of stdout

EXAMPLES:
    site-locale site/index.json
    site-locale -b th-TH site/index.json
    site-locale -s en -o out.json site/index.json
    site-locale -u https://example.com/ site/index.json
"#
    );
}

/// Print version information
fn print_version() {
    println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
}
