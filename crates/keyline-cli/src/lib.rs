// ABOUTME: CLI library components for the keyline command.
// ABOUTME: Config handling and command implementations shared with the binary.

//! # keyline-cli
//!
//! Command-line front end for the keyline public-key converter.
//!
//! ```text
//! keyline
//! ├── convert [PATH]                # Print the key as an OpenSSH line
//! ├── fingerprint [PATH]            # Print the SHA256 fingerprint
//! ├── init                          # Write the default config file
//! └── version                       # Show version info
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Convert a PEM public key
//! keyline convert key.pem
//!
//! # Read from stdin and emit JSON
//! cat id_ed25519.pub | keyline convert --json
//!
//! # Fingerprint like ssh-keygen -l
//! keyline fingerprint key.pem
//! ```

pub mod commands;
pub mod config;

/// Version of the keyline CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
