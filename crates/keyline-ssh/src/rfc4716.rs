// ABOUTME: RFC 4716 "SSH2 public key" block decoding.
// ABOUTME: Handles header lines with continuations and the wrapped base64 body.

use crate::error::{KeyError, Result};
use crate::key;
use base64::Engine;
use ssh_key::public::KeyData;

/// Opening boundary of an RFC 4716 block.
pub const BEGIN_MARKER: &str = "---- BEGIN SSH2 PUBLIC KEY ----";
/// Closing boundary of an RFC 4716 block.
pub const END_MARKER: &str = "---- END SSH2 PUBLIC KEY ----";

/// A decoded RFC 4716 block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ssh2PublicKey {
    pub key: KeyData,
    /// Value of the `Comment` header with surrounding quotes removed.
    pub comment: Option<String>,
}

/// Decode an RFC 4716 public key block.
///
/// # Errors
/// Returns `MalformedInput` for missing boundaries, an unterminated header
/// continuation or an invalid body.
pub fn decode_ssh2(input: &str) -> Result<Ssh2PublicKey> {
    let mut lines = input.lines().map(str::trim_end);

    if lines.next() != Some(BEGIN_MARKER) {
        return Err(KeyError::malformed("missing SSH2 public key begin marker"));
    }

    let mut comment = None;
    let mut body = String::new();
    let mut pending_header: Option<String> = None;
    let mut terminated = false;

    for line in lines.by_ref() {
        if let Some(mut header) = pending_header.take() {
            header.push_str(line);
            if let Some(stripped) = header.strip_suffix('\\') {
                pending_header = Some(stripped.to_string());
            } else {
                read_header(&header, &mut comment);
            }
            continue;
        }

        if line == END_MARKER {
            terminated = true;
            break;
        }

        // Base64 never contains ':', so any such line before the body is a header
        if body.is_empty() && line.contains(':') {
            match line.strip_suffix('\\') {
                Some(partial) => pending_header = Some(partial.to_string()),
                None => read_header(line, &mut comment),
            }
            continue;
        }

        body.push_str(line.trim());
    }

    if pending_header.is_some() {
        return Err(KeyError::malformed("unterminated header continuation"));
    }
    if !terminated {
        return Err(KeyError::malformed("missing SSH2 public key end marker"));
    }
    if lines.any(|line| !line.trim().is_empty()) {
        return Err(KeyError::malformed("data after SSH2 public key end marker"));
    }

    let blob = base64::engine::general_purpose::STANDARD.decode(&body)?;
    let key = key::from_blob(&blob)?;

    Ok(Ssh2PublicKey { key, comment })
}

fn read_header(header: &str, comment: &mut Option<String>) {
    let Some((tag, value)) = header.split_once(':') else {
        return;
    };
    // Unknown headers are ignored per RFC 4716 section 3.3
    if tag.trim().eq_ignore_ascii_case("comment") {
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        if !value.is_empty() {
            *comment = Some(value.to_string());
        }
    }
}
