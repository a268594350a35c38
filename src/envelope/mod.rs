//! Ansible Vault envelope parsing.
//!
//! An encrypted block on disk looks like this:
//!
//! ```text
//! $ANSIBLE_VAULT;1.2;AES256;myid
//! 62313365396662343061393464336163383764373764613633653634306231386433626436623361
//! 6134333665353966363534333632666535333761666131620a663537646436643839616531643561
//! ...
//! ```
//!
//! The first line is the semicolon-separated header; everything after it
//! is the hex-encoded ciphertext. This module only parses the header —
//! the body belongs to the cipher provider and is never validated or
//! altered here. There is deliberately no header *serializer*: envelopes
//! are produced by the provider, and this codec exists so the rest of the
//! crate can discover which vault-id encrypted a given block.

use crate::errors::{Result, YamlVaultError};

/// Magic literal at the start of every envelope header.
pub const HEADER_MAGIC: &str = "$ANSIBLE_VAULT";

/// The only cipher name this crate understands.
pub const CIPHER_AES256: &str = "AES256";

/// Envelope format versions we accept.
///
/// 1.1 headers never carry a vault-id; 1.2 headers may.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultVersion {
    V1_1,
    V1_2,
}

impl VaultVersion {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "1.1" => Some(Self::V1_1),
            "1.2" => Some(Self::V1_2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1_1 => "1.1",
            Self::V1_2 => "1.2",
        }
    }
}

/// Parsed fields of an envelope header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeHeader {
    /// Envelope format version.
    pub version: VaultVersion,

    /// Cipher name from the header (always `AES256` once parsed).
    pub cipher: String,

    /// Optional vault-id label (1.2 headers only).
    pub vault_id: Option<String>,
}

/// A complete envelope: header plus the untouched ciphertext body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub header: EnvelopeHeader,

    /// Raw hex body exactly as it appeared after the header line.
    pub body: String,
}

impl Envelope {
    /// Split `text` into header line and body, parsing only the header.
    ///
    /// The body is carried through byte-for-byte; whether it is valid
    /// hex is the cipher provider's concern.
    pub fn parse(text: &str) -> Result<Self> {
        let (first_line, body) = match text.split_once('\n') {
            Some((head, rest)) => (head, rest),
            None => (text, ""),
        };

        let header = parse_header(first_line)?;

        Ok(Self {
            header,
            body: body.to_string(),
        })
    }
}

/// Parse a single envelope header line.
///
/// Accepted shapes (fields separated by `;`):
///
/// - `$ANSIBLE_VAULT;1.1;AES256`
/// - `$ANSIBLE_VAULT;1.2;AES256;<vault-id>`
pub fn parse_header(header_line: &str) -> Result<EnvelopeHeader> {
    let fields: Vec<&str> = header_line.trim_end().split(';').collect();

    if fields.len() != 3 && fields.len() != 4 {
        return Err(YamlVaultError::MalformedEnvelope(format!(
            "expected 3 or 4 header fields, found {}",
            fields.len()
        )));
    }

    if fields[0] != HEADER_MAGIC {
        return Err(YamlVaultError::MalformedEnvelope(format!(
            "header does not start with {HEADER_MAGIC}"
        )));
    }

    let version = VaultVersion::parse(fields[1]).ok_or_else(|| {
        YamlVaultError::MalformedEnvelope(format!("unsupported version '{}'", fields[1]))
    })?;

    if fields[2] != CIPHER_AES256 {
        return Err(YamlVaultError::MalformedEnvelope(format!(
            "unsupported cipher '{}'",
            fields[2]
        )));
    }

    let vault_id = match fields.get(3) {
        Some(id) if version == VaultVersion::V1_1 => {
            return Err(YamlVaultError::MalformedEnvelope(format!(
                "version 1.1 header must not carry a vault-id (found '{id}')"
            )));
        }
        Some(id) if id.is_empty() => {
            return Err(YamlVaultError::MalformedEnvelope(
                "empty vault-id field".into(),
            ));
        }
        Some(id) => Some((*id).to_string()),
        None => None,
    };

    Ok(EnvelopeHeader {
        version,
        cipher: fields[2].to_string(),
        vault_id,
    })
}

/// Extract the vault-id label from a tag-stripped block, if any.
///
/// Only the first line is inspected; the body is not validated. Used for
/// secret matching before decryption.
pub fn extract_vault_id(block_text: &str) -> Result<Option<String>> {
    let first_line = block_text.lines().next().unwrap_or("");
    let header = parse_header(first_line)?;
    Ok(header.vault_id)
}
