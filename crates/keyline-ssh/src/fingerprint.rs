// ABOUTME: SSH public key fingerprint computation.
// ABOUTME: SHA256 over the RFC 4253 blob, as lowercase hex or OpenSSH "SHA256:" form.

use ssh_key::public::KeyData;
use ssh_key::HashAlg;

/// Compute SHA256 fingerprint of a public key (hex encoded, lowercase).
///
/// Same digest as `ssh-keygen -l -E sha256`, printed as hex instead of
/// base64.
///
/// # Returns
/// A 64-character lowercase hex string.
pub fn compute_fingerprint(key: &KeyData) -> String {
    hex::encode(key.fingerprint(HashAlg::Sha256).as_bytes())
}

/// Compute the fingerprint as printed by `ssh-keygen -l -E sha256`.
pub fn openssh_fingerprint(key: &KeyData) -> String {
    key.fingerprint(HashAlg::Sha256).to_string()
}
