// ABOUTME: SSH public-key conversion library for keyline.
// ABOUTME: Parses PEM, RFC 4716 and OpenSSH public keys and renders canonical OpenSSH lines.

//! # keyline-ssh
//!
//! Converts an SSH public key from any of the common textual encodings
//! into the canonical single-line OpenSSH (`authorized_keys`) format.
//!
//! ## Supported inputs
//!
//! - **PEM SubjectPublicKeyInfo** (`-----BEGIN PUBLIC KEY-----`)
//! - **PEM PKCS#1** (`-----BEGIN RSA PUBLIC KEY-----`)
//! - **RFC 4716** (`---- BEGIN SSH2 PUBLIC KEY ----`, `ssh-keygen -e` output)
//! - **OpenSSH lines** (`ssh-ed25519 AAAA... comment`)
//!
//! Keys may be RSA, DSA, ECDSA on nistp256/384/521, or Ed25519. Keys are
//! represented as [`ssh_key::public::KeyData`], and the RFC 4253 encoding,
//! OpenSSH rendering and fingerprints come from `ssh-key`.
//!
//! ## Example
//!
//! ```
//! use keyline_ssh::{convert, KeyError};
//!
//! let line = convert(
//!     "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGgg8+Z4Wt+fM2JGZfGYNzWonOfFFJV4xa3ZM5RFNCDz alice@host",
//! )
//! .expect("key should convert");
//! assert_eq!(line.algorithm, "ssh-ed25519");
//! assert_eq!(line.comment.as_deref(), Some("alice@host"));
//!
//! assert_eq!(convert("   ").unwrap_err(), KeyError::EmptyInput);
//! ```

mod convert;
mod error;
mod fingerprint;
pub mod key;
mod pem;
mod rfc4716;

// Re-export primary types and functions
pub use convert::{convert, detect_form, EncodedKeyLine, InputForm};
pub use error::{KeyError, Result};
pub use fingerprint::{compute_fingerprint, openssh_fingerprint};
pub use pem::{decode_pem, decode_pkcs1_rsa, decode_spki, PKCS1_LABEL, SPKI_LABEL};
pub use rfc4716::{decode_ssh2, Ssh2PublicKey};
pub use ssh_key::public::KeyData;
pub use ssh_key::EcdsaCurve;
