// ABOUTME: Public-key conversion into the canonical OpenSSH authorized-keys line.
// ABOUTME: Detects the input encoding, decodes it and re-serializes the key.

use crate::error::{KeyError, Result};
use crate::fingerprint::openssh_fingerprint;
use crate::key::{ensure_supported, to_blob};
use crate::pem::decode_pem;
use crate::rfc4716::{self, decode_ssh2};
use base64::Engine;
use serde::Serialize;
use ssh_key::public::KeyData;
use std::fmt;

/// Textual encodings accepted by [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputForm {
    /// `-----BEGIN PUBLIC KEY-----` or `-----BEGIN RSA PUBLIC KEY-----`.
    Pem,
    /// `---- BEGIN SSH2 PUBLIC KEY ----`.
    Ssh2,
    /// `<algorithm> <base64> [comment]`.
    OpenSsh,
}

impl fmt::Display for InputForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pem => "PEM",
            Self::Ssh2 => "RFC 4716",
            Self::OpenSsh => "OpenSSH",
        })
    }
}

/// Work out which encoding `input` uses.
///
/// # Errors
/// Returns `EmptyInput` when `input` is empty or whitespace.
pub fn detect_form(input: &str) -> Result<InputForm> {
    let input = input.trim();
    if input.is_empty() {
        Err(KeyError::EmptyInput)
    } else if input.starts_with(rfc4716::BEGIN_MARKER) {
        Ok(InputForm::Ssh2)
    } else if input.starts_with("-----BEGIN ") {
        Ok(InputForm::Pem)
    } else {
        Ok(InputForm::OpenSsh)
    }
}

/// A public key rendered as an OpenSSH authorized-keys line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedKeyLine {
    /// Algorithm name token, e.g. `ssh-ed25519`.
    pub algorithm: String,
    /// Standard base64 of the RFC 4253 blob, unwrapped.
    pub blob: String,
    /// Trailing comment copied from the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip)]
    key: KeyData,
}

impl EncodedKeyLine {
    pub fn new(key: KeyData, comment: Option<String>) -> Result<Self> {
        let blob = base64::engine::general_purpose::STANDARD.encode(to_blob(&key)?);
        Ok(Self {
            algorithm: key.algorithm().as_str().to_string(),
            blob,
            comment: comment.filter(|c| !c.is_empty()),
            key,
        })
    }

    /// The decoded key.
    pub fn key(&self) -> &KeyData {
        &self.key
    }

    /// Replace the comment. Newlines are not allowed in a key line, so
    /// any line breaks are collapsed to spaces.
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment
            .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|c| !c.is_empty());
        self
    }

    /// `SHA256:...` fingerprint of the key.
    pub fn fingerprint(&self) -> String {
        openssh_fingerprint(&self.key)
    }

    /// The key as an [`ssh_key::PublicKey`], carrying the comment.
    pub fn to_ssh_key(&self) -> ssh_key::PublicKey {
        ssh_key::PublicKey::new(self.key.clone(), self.comment.clone().unwrap_or_default())
    }
}

impl fmt::Display for EncodedKeyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Encoding already succeeded once in `new`
        let line = self.to_ssh_key().to_openssh().map_err(|_| fmt::Error)?;
        f.write_str(&line)
    }
}

/// Split off the first whitespace-delimited token.
fn next_token(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (s, ""),
    }
}

fn decode_openssh_line(line: &str) -> Result<(KeyData, Option<String>)> {
    if line.contains(['\n', '\r']) {
        return Err(KeyError::malformed(
            "expected a single OpenSSH key line, found several lines",
        ));
    }

    let (algorithm, rest) = next_token(line);
    let (encoded, comment) = next_token(rest);
    if encoded.is_empty() {
        return Err(KeyError::malformed(format!(
            "missing key data after \"{algorithm}\""
        )));
    }

    if ssh_key::Algorithm::new_certificate(algorithm).is_ok() {
        return Err(KeyError::unsupported(algorithm));
    }

    // ssh-key separates fields with single spaces and keeps the comment's
    // leading whitespace, so only the first two tokens go through it
    let public = ssh_key::PublicKey::from_openssh(&format!("{algorithm} {encoded}"))?;
    let key = KeyData::from(public);
    ensure_supported(&key)?;
    if base64::engine::general_purpose::STANDARD.encode(to_blob(&key)?) != encoded {
        return Err(KeyError::malformed("key data is not canonically encoded"));
    }

    let comment = comment.trim_end();
    Ok((key, (!comment.is_empty()).then(|| comment.to_string())))
}

/// Convert a public key in any supported encoding into an OpenSSH line.
///
/// Accepts PEM SubjectPublicKeyInfo, PEM PKCS#1 RSA, RFC 4716 and OpenSSH
/// lines. The comment of an OpenSSH line (or the `Comment` header of an
/// RFC 4716 block) is carried over; PEM input has none.
///
/// # Errors
/// - `EmptyInput` for empty or whitespace-only input
/// - `MalformedInput` when any decoding stage fails
/// - `UnsupportedAlgorithm` for well-formed keys of other algorithms or curves
pub fn convert(input: &str) -> Result<EncodedKeyLine> {
    let input = input.trim();
    let (key, comment) = match detect_form(input)? {
        InputForm::Pem => (decode_pem(input)?, None),
        InputForm::Ssh2 => {
            let decoded = decode_ssh2(input)?;
            (decoded.key, decoded.comment)
        }
        InputForm::OpenSsh => decode_openssh_line(input)?,
    };
    EncodedKeyLine::new(key, comment)
}
