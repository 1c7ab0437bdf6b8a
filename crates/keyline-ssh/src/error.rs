// ABOUTME: Error types for public-key conversion using thiserror.
// ABOUTME: Distinguishes empty input, malformed encodings and unsupported algorithms.

use thiserror::Error;

/// Errors that can occur while converting a public key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The input was empty or contained only whitespace.
    #[error("no public key supplied")]
    EmptyInput,

    /// The input is structurally invalid at some decoding stage.
    #[error("malformed public key: {0}")]
    MalformedInput(String),

    /// The input is well-formed but names a key type or curve we don't handle.
    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl KeyError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }

    pub(crate) fn unsupported(algorithm: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(algorithm.into())
    }
}

impl From<der::Error> for KeyError {
    fn from(err: der::Error) -> Self {
        Self::MalformedInput(format!("ASN.1 decoding failed: {err}"))
    }
}

impl From<ssh_key::Error> for KeyError {
    fn from(err: ssh_key::Error) -> Self {
        match err {
            // ssh-key reports a name/key-data disagreement this way
            ssh_key::Error::AlgorithmUnknown => Self::MalformedInput(
                "algorithm name does not match the key data".to_string(),
            ),
            ssh_key::Error::AlgorithmUnsupported { algorithm } => {
                Self::UnsupportedAlgorithm(algorithm.to_string())
            }
            other => Self::MalformedInput(format!("invalid SSH key encoding: {other}")),
        }
    }
}

impl From<base64::DecodeError> for KeyError {
    fn from(err: base64::DecodeError) -> Self {
        Self::MalformedInput(format!("invalid base64: {err}"))
    }
}

/// Result type alias using KeyError.
pub type Result<T> = std::result::Result<T, KeyError>;
