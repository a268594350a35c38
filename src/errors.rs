use thiserror::Error;

/// All errors that can occur in yamlvault.
///
/// `IdentityNotFound` and `NoSecretsConfigured` are fallback signals
/// rather than hard failures: callers are expected to react by asking
/// the user for a password interactively.
#[derive(Debug, Error)]
pub enum YamlVaultError {
    // --- Envelope errors ---
    #[error("Malformed vault envelope: {0}")]
    MalformedEnvelope(String),

    // --- Transform errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong password or corrupted envelope")]
    DecryptionFailed,

    #[error("No configured secret matches vault-id '{0}'")]
    IdentityNotFound(String),

    // --- Config errors ---
    #[error("No vault secrets configured")]
    NoSecretsConfigured,

    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for yamlvault results.
pub type Result<T> = std::result::Result<T, YamlVaultError>;
