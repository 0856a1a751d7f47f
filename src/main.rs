use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use heroicon::AppConfig;
use heroicon::host::{AdminRequest, FileCache, FileTemplates, RecordingAdmin};
use heroicon::plugin::PluginManager;
use heroicon::plugin::donation::DismissOutcome;

/// Drive the heroicon plugin against a file-backed host.
#[derive(Debug, Parser)]
#[command(name = "heroicon", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Expand icon tags in a post body (stdin when no file is given)
    Render { file: Option<PathBuf> },
    /// Register the plugin in the author's cache namespace
    Install,
    /// Remove the plugin's cache record
    Uninstall,
    /// Add the icon stylesheet to the header template
    Activate,
    /// Remove the icon stylesheet from the header template
    Deactivate,
    /// Show install and donation state
    Status,
    /// Print plugin-list metadata
    Info {
        #[arg(long, default_value = "")]
        post_code: String,
    },
    /// Handle the admin "close donation" request
    Dismiss {
        /// Raw query string of the admin request
        #[arg(long)]
        query: String,
        /// Session post-verification token
        #[arg(long)]
        post_code: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    // Initialize logging to file (never stdout, it carries rendered posts)
    let data_dir = config.data_dir();
    fs::create_dir_all(&data_dir)?;

    let file_appender = tracing_appender::rolling::daily(&data_dir, "heroicon.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(config.general.log_filter.as_str())
        .init();

    tracing::info!("heroicon {:?}", cli.command);

    let manager = PluginManager::new(&config);
    let mut cache = FileCache::new(data_dir.join("cache"));
    let mut templates = FileTemplates::new(data_dir.join("templates"));

    match cli.command {
        Command::Render { file } => {
            let message = read_message(file)?;
            let rendered = manager.expander().expand(&message);
            io::stdout().write_all(rendered.as_bytes())?;
        }
        Command::Install => {
            manager.install(&mut cache)?;
            println!("installed");
        }
        Command::Uninstall => {
            manager.uninstall(&mut cache)?;
            println!("uninstalled");
        }
        Command::Activate => {
            manager.activate(&mut templates)?;
            println!("stylesheet added to {}", config.host.template);
        }
        Command::Deactivate => {
            manager.deactivate(&mut templates)?;
            println!("stylesheet removed from {}", config.host.template);
        }
        Command::Status => {
            match manager.record(&cache)? {
                Some(record) => println!(
                    "installed: {} {} by {} (donation banner {})",
                    record.name,
                    record.version,
                    record.author,
                    if manager.donation_status(&cache)? { "on" } else { "off" }
                ),
                None => println!("not installed"),
            }
            println!("icons: {}", manager.expander().icon_dir().display());
        }
        Command::Info { post_code } => {
            let info = manager.info(&cache, &post_code)?;
            print!("{}", toml::to_string_pretty(&info)?);
        }
        Command::Dismiss { query, post_code } => {
            let request = AdminRequest::from_query(&query);
            let mut admin = RecordingAdmin::default();
            match manager.handle_dismiss_request(&request, &post_code, &mut cache, &mut admin)? {
                DismissOutcome::Dismissed => {
                    for (message, kind) in &admin.flashes {
                        println!("{kind:?}: {message}");
                    }
                    for url in &admin.redirects {
                        println!("redirect: {url}");
                    }
                }
                DismissOutcome::Ignored => println!("ignored"),
            }
        }
    }

    Ok(())
}

fn read_message(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut message = String::new();
            io::stdin().read_to_string(&mut message)?;
            Ok(message)
        }
    }
}
