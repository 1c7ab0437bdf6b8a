// ABOUTME: Builds and validates ssh-key KeyData for RSA, DSA, ECDSA and Ed25519 keys.
// ABOUTME: Encodes to and decodes from RFC 4253 public-key blobs through ssh-key.

use crate::error::{KeyError, Result};
use ssh_key::public::{DsaPublicKey, EcdsaPublicKey, Ed25519PublicKey, KeyData, RsaPublicKey};
use ssh_key::{EcdsaCurve, Mpint};

/// SEC1 tag byte of an uncompressed curve point.
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// Build an RSA key from big-endian unsigned exponent and modulus.
pub fn rsa(e: &[u8], n: &[u8]) -> Result<KeyData> {
    Ok(KeyData::Rsa(RsaPublicKey {
        e: Mpint::from_positive_bytes(e)?,
        n: Mpint::from_positive_bytes(n)?,
    }))
}

/// Build a DSA key from big-endian unsigned domain parameters and public value.
pub fn dsa(p: &[u8], q: &[u8], g: &[u8], y: &[u8]) -> Result<KeyData> {
    Ok(KeyData::Dsa(DsaPublicKey {
        p: Mpint::from_positive_bytes(p)?,
        q: Mpint::from_positive_bytes(q)?,
        g: Mpint::from_positive_bytes(g)?,
        y: Mpint::from_positive_bytes(y)?,
    }))
}

/// Build an ECDSA key, requiring an uncompressed point on `curve`.
pub fn ecdsa(curve: EcdsaCurve, point: &[u8]) -> Result<KeyData> {
    if point.first() != Some(&SEC1_UNCOMPRESSED) {
        return Err(KeyError::malformed(format!(
            "{curve} point is not in uncompressed form"
        )));
    }
    let key = EcdsaPublicKey::from_sec1_bytes(point)?;
    if key.curve() != curve {
        return Err(KeyError::malformed(format!(
            "{}-byte point does not belong to {curve}",
            point.len()
        )));
    }
    Ok(KeyData::Ecdsa(key))
}

/// Build an Ed25519 key from raw key material.
pub fn ed25519(key: &[u8]) -> Result<KeyData> {
    let key: [u8; Ed25519PublicKey::BYTE_SIZE] = key.try_into().map_err(|_| {
        KeyError::malformed(format!(
            "ed25519 key must be {} bytes, got {}",
            Ed25519PublicKey::BYTE_SIZE,
            key.len()
        ))
    })?;
    Ok(KeyData::Ed25519(Ed25519PublicKey(key)))
}

fn ensure_positive(values: &[&Mpint]) -> Result<()> {
    let negative = values
        .iter()
        .any(|m| !m.as_bytes().is_empty() && m.as_positive_bytes().is_none());
    if negative {
        return Err(KeyError::malformed("negative integer in public key"));
    }
    Ok(())
}

/// Reject key types outside RSA, DSA, ECDSA and Ed25519, and key material
/// that ssh-key accepts but an authorized-keys line must not carry.
pub(crate) fn ensure_supported(key: &KeyData) -> Result<()> {
    match key {
        KeyData::Rsa(rsa) => ensure_positive(&[&rsa.e, &rsa.n]),
        KeyData::Dsa(dsa) => ensure_positive(&[&dsa.p, &dsa.q, &dsa.g, &dsa.y]),
        KeyData::Ecdsa(ec) if ec.as_sec1_bytes().first() != Some(&SEC1_UNCOMPRESSED) => Err(
            KeyError::malformed(format!("{} point is not in uncompressed form", ec.curve())),
        ),
        KeyData::Ecdsa(_) | KeyData::Ed25519(_) => Ok(()),
        other => Err(KeyError::unsupported(other.algorithm().as_str())),
    }
}

/// Serialize as an RFC 4253 public-key blob.
pub fn to_blob(key: &KeyData) -> Result<Vec<u8>> {
    Ok(ssh_key::PublicKey::from(key.clone()).to_bytes()?)
}

/// Parse an RFC 4253 public-key blob.
///
/// The blob must be the canonical encoding of the key it holds, so
/// re-encoding reproduces it byte for byte.
///
/// # Errors
/// Returns `MalformedInput` for truncated fields, trailing bytes or
/// non-canonical encodings and `UnsupportedAlgorithm` for algorithm names
/// we don't handle.
pub fn from_blob(blob: &[u8]) -> Result<KeyData> {
    let key = KeyData::from(ssh_key::PublicKey::from_bytes(blob)?);
    ensure_supported(&key)?;
    if to_blob(&key)? != blob {
        return Err(KeyError::malformed("key data is not canonically encoded"));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p256_point() -> Vec<u8> {
        let mut point = vec![SEC1_UNCOMPRESSED];
        point.extend((1..=64).map(|i| i as u8));
        point
    }

    /// Length-prefixed SSH string.
    fn string(out: &mut Vec<u8>, bytes: &[u8]) {
        out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        out.extend_from_slice(bytes);
    }

    #[test]
    fn test_rsa_strips_leading_zeros_and_pads() {
        let key = rsa(&[0, 0x01, 0x00, 0x01], &[0xc3, 0x5a, 0x11, 0x07]).unwrap();
        let blob = to_blob(&key).unwrap();

        // "ssh-rsa" + e (3 bytes) + n (4 bytes + pad byte)
        assert_eq!(blob.len(), 4 + 7 + 4 + 3 + 4 + 5);
        assert_eq!(&blob[4..11], b"ssh-rsa");
        assert_eq!(from_blob(&blob).unwrap(), key);
    }

    #[test]
    fn test_dsa_blob_round_trip() {
        let key = dsa(&[0xff, 0x01], &[0x7f], &[0x02], &[0x80, 0x00]).unwrap();
        let decoded = from_blob(&to_blob(&key).unwrap()).unwrap();
        assert_eq!(decoded, key);
        assert_eq!(decoded.algorithm().as_str(), "ssh-dss");
    }

    #[test]
    fn test_zero_mpint_encodes_empty() {
        let key = rsa(&[0, 0], &[0x05]).unwrap();
        let blob = to_blob(&key).unwrap();
        // "ssh-rsa" + empty e + n
        assert_eq!(&blob[11..15], &[0, 0, 0, 0]);
        assert_eq!(from_blob(&blob).unwrap(), key);
    }

    #[test]
    fn test_ecdsa_blob_round_trip() {
        let key = ecdsa(EcdsaCurve::NistP256, &p256_point()).unwrap();
        assert_eq!(from_blob(&to_blob(&key).unwrap()).unwrap(), key);
        assert_eq!(key.algorithm().as_str(), "ecdsa-sha2-nistp256");
    }

    #[test]
    fn test_ed25519_blob_layout() {
        let key = ed25519(&[7u8; 32]).unwrap();
        let blob = to_blob(&key).unwrap();

        // 4 + "ssh-ed25519" + 4 + 32
        assert_eq!(blob.len(), 51);
        assert_eq!(from_blob(&blob).unwrap(), key);
    }

    #[test]
    fn test_ecdsa_rejects_compressed_point() {
        let mut point = vec![0x02];
        point.extend([0u8; 32]);
        let err = ecdsa(EcdsaCurve::NistP256, &point).unwrap_err();
        assert!(err.to_string().contains("uncompressed"));
    }

    #[test]
    fn test_ecdsa_rejects_point_of_other_curve() {
        let err = ecdsa(EcdsaCurve::NistP384, &p256_point()).unwrap_err();
        assert!(matches!(err, KeyError::MalformedInput(_)));
    }

    #[test]
    fn test_ecdsa_curve_mismatch_in_blob() {
        let mut blob = Vec::new();
        string(&mut blob, b"ecdsa-sha2-nistp256");
        string(&mut blob, b"nistp384");
        string(&mut blob, &p256_point());
        let err = from_blob(&blob).unwrap_err();
        assert!(matches!(err, KeyError::MalformedInput(_)));
    }

    #[test]
    fn test_ed25519_wrong_length() {
        let err = ed25519(&[0u8; 31]).unwrap_err();
        assert!(err.to_string().contains("32 bytes"));
    }

    #[test]
    fn test_ed25519_overlong_declared_length_rejected() {
        let mut blob = Vec::new();
        string(&mut blob, b"ssh-ed25519");
        blob.extend_from_slice(&255u32.to_be_bytes());
        blob.extend_from_slice(&[0u8; 32]);
        let err = from_blob(&blob).unwrap_err();
        assert!(matches!(err, KeyError::MalformedInput(_)));
    }

    #[test]
    fn test_unknown_algorithm_is_unsupported() {
        let mut blob = Vec::new();
        string(&mut blob, b"ssh-xmss@openssh.com");
        string(&mut blob, &[1, 2, 3]);
        let err = from_blob(&blob).unwrap_err();
        assert_eq!(
            err,
            KeyError::UnsupportedAlgorithm("ssh-xmss@openssh.com".to_string())
        );
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut blob = to_blob(&ed25519(&[1u8; 32]).unwrap()).unwrap();
        blob.push(0);
        let err = from_blob(&blob).unwrap_err();
        assert!(err.to_string().contains("trailing"));
    }

    #[test]
    fn test_truncated_field_rejected() {
        let blob = to_blob(&ed25519(&[1u8; 32]).unwrap()).unwrap();
        let err = from_blob(&blob[..blob.len() - 1]).unwrap_err();
        assert!(matches!(err, KeyError::MalformedInput(_)));
    }

    #[test]
    fn test_non_canonical_mpint_rejected() {
        // e = 65537 with a redundant leading zero byte
        let mut blob = Vec::new();
        string(&mut blob, b"ssh-rsa");
        string(&mut blob, &[0x00, 0x01, 0x00, 0x01]);
        string(&mut blob, &[0x00, 0xc3]);
        let err = from_blob(&blob).unwrap_err();
        assert!(matches!(err, KeyError::MalformedInput(_)));
    }

    #[test]
    fn test_negative_mpint_rejected() {
        let mut blob = Vec::new();
        string(&mut blob, b"ssh-rsa");
        string(&mut blob, &[0x01, 0x00, 0x01]);
        string(&mut blob, &[0xc3, 0x01]);
        let err = from_blob(&blob).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }
}
