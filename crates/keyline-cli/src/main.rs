// ABOUTME: Entry point for the keyline command.
// ABOUTME: Dispatches to convert, fingerprint, init and version subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use keyline_cli::commands::{self, ConvertOptions};
use keyline_cli::config::Config;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(name = "keyline")]
#[command(about = "Convert SSH public keys into canonical OpenSSH lines")]
#[command(version)]
struct Cli {
    /// Path to configuration file (defaults to ~/.config/keyline/config.toml)
    #[arg(long, global = true, env = "KEYLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a public key to an OpenSSH authorized-keys line
    Convert {
        /// Key file (PEM, RFC 4716 or OpenSSH); reads stdin when omitted
        path: Option<PathBuf>,

        /// Print a JSON object instead of a key line
        #[arg(long)]
        json: bool,

        /// Comment to attach to the output line
        #[arg(long, short = 'c', conflicts_with = "strip_comment")]
        comment: Option<String>,

        /// Drop the comment carried by the input
        #[arg(long)]
        strip_comment: bool,
    },

    /// Print the SHA256 fingerprint of a public key
    Fingerprint {
        /// Key file; reads stdin when omitted
        path: Option<PathBuf>,

        /// Print lowercase hex instead of SHA256:<base64>
        #[arg(long)]
        hex: bool,
    },

    /// Write the default config file
    Init,

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    keyline_log::init(cli.verbose);

    match cli.command {
        Commands::Convert {
            path,
            json,
            comment,
            strip_comment,
        } => {
            let config = load_config(cli.config)?;
            let input = commands::read_input(path.as_deref())?;
            let options = ConvertOptions {
                comment,
                strip_comment,
                json,
            };
            println!("{}", commands::run_convert(&input, &config, &options)?);
            Ok(())
        }
        Commands::Fingerprint { path, hex } => {
            let config = load_config(cli.config)?;
            let input = commands::read_input(path.as_deref())?;
            println!("{}", commands::run_fingerprint(&input, &config, hex)?);
            Ok(())
        }
        Commands::Init => {
            let path = match cli.config {
                Some(path) => Config::init_at(&path)?,
                None => Config::init()?,
            };
            println!("Config: {}", path.display());
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Load the config named on the command line, or the default one.
///
/// An explicit path must exist; the default location falls back to
/// built-in defaults when absent.
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            Config::load_from(&path)
        }
        None => {
            let default_path = Config::config_path();
            debug!(path = %default_path.display(), "loading default config");
            Config::load().or_else(|e| {
                warn!("ignoring unusable config at {}: {e:#}", default_path.display());
                Ok(Config::default())
            })
        }
    }
}

fn print_version() {
    println!("keyline {}", keyline_cli::VERSION);
    println!();
    println!("Supported inputs: PEM (SPKI, PKCS#1), RFC 4716, OpenSSH");
    println!("Supported keys:   ssh-rsa, ssh-dss, ecdsa-sha2-nistp256/384/521, ssh-ed25519");
    println!();
    println!("Repository: https://github.com/2389-research/keyline");
}
