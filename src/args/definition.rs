//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// langgate - Resolve, load and inspect site translations
#[derive(Parser, Debug)]
#[command(name = "langgate")]
#[command(version)]
#[command(about = "Resolve, load and inspect site translations", long_about = None)]
pub struct Args {
    /// Path to i18n.yml (default: ~/.config/langgate/i18n.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show which locale a location resolves to and where its document is looked up
    Resolve {
        /// URL or path (e.g. "/fr/team" or "https://example.org/?lang=de")
        location: String,

        /// Browser language list (e.g. "fr-CH, fr;q=0.9"); defaults to the environment locale
        #[arg(long)]
        browser_lang: Option<String>,
    },

    /// Load the document for a location and print translations
    Translate {
        /// URL or path used to pick the locale
        #[arg(long, default_value = "/")]
        location: String,

        /// Load this locale instead of resolving one from the location
        #[arg(long)]
        locale: Option<String>,

        /// Dot-notation keys (e.g. "nav.contact")
        #[arg(required = true, num_args = 1..)]
        keys: Vec<String>,
    },

    /// Switch to a locale, persist the choice and print the rewritten location
    Switch {
        /// Target locale code; unsupported codes switch to the default locale
        locale: String,

        /// Location to rewrite
        #[arg(long, default_value = "/")]
        location: String,
    },

    /// List keys present in the default locale but missing elsewhere
    Audit {
        /// Locales to check (default: every non-default locale)
        #[arg(long, num_args = 1..)]
        against: Vec<String>,
    },
}

/// What: Dispatch the parsed subcommand.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `Ok(true)` when the command succeeded, `Ok(false)` when it ran but found problems
///
/// # Errors
/// - Returns `Err` when configuration cannot be loaded or validated
///
/// Details:
/// - A preference file that cannot be written is logged, not returned; the switch still applies
pub async fn process_args(args: &Args) -> Result<bool, String> {
    use crate::args::{audit, resolve, switch, translate, utils};

    let config = utils::load_settings(args.config.as_deref())?;
    match &args.command {
        Command::Resolve {
            location,
            browser_lang,
        } => resolve::handle_resolve(&config, location, browser_lang.as_deref()),
        Command::Translate {
            location,
            locale,
            keys,
        } => translate::handle_translate(&config, location, locale.as_deref(), keys).await,
        Command::Switch { locale, location } => {
            switch::handle_switch(&config, locale, location).await
        }
        Command::Audit { against } => audit::handle_audit(&config, against).await,
    }
}
