//! End-to-end vault block transformation.
//!
//! `VaultTransformer` wraps the envelope, text and config layers around
//! an external cipher so callers work with whole blocks: raw selected
//! text in, tagged and indented vault block out (and back). The cipher
//! itself stays behind the narrow [`VaultCipher`] trait — this crate
//! frames ciphertext, it never produces it.

use crate::config::Secret;
use crate::envelope;
use crate::errors::{Result, YamlVaultError};
use crate::text::{add_tag, compute_indent, pad, remove_tag, unpad};

/// The external cipher provider seam.
///
/// Implementations own the entire envelope byte format (header fields,
/// hex body, line wrapping); the transformer passes envelope text
/// through untouched, so round-trips are byte-exact.
pub trait VaultCipher {
    /// Encrypt `plaintext` into envelope text, labeling the header with
    /// `vault_id` when given.
    fn encrypt_envelope(
        &self,
        plaintext: &str,
        password: &str,
        vault_id: Option<&str>,
    ) -> Result<String>;

    /// Decrypt envelope text back into plaintext. Fails on a wrong
    /// password or a malformed envelope.
    fn decrypt_envelope(&self, envelope_text: &str, password: &str) -> Result<String>;
}

/// Transforms a single text block per call; no state is kept between
/// calls, so one transformer can serve any number of blocks.
pub struct VaultTransformer<C> {
    cipher: C,
}

impl<C: VaultCipher> VaultTransformer<C> {
    pub fn new(cipher: C) -> Self {
        Self { cipher }
    }

    /// Encrypt `plaintext` into a block ready to paste into a YAML
    /// document at the position described by `context_line`.
    ///
    /// The cipher output is decorated with the `!vault` tag and indented
    /// one key level deeper than the context line.
    pub fn encrypt(&self, plaintext: &str, secret: &Secret, context_line: &str) -> Result<String> {
        let envelope_text =
            self.cipher
                .encrypt_envelope(plaintext, &secret.password, secret.id.as_deref())?;

        let tagged = add_tag(&envelope_text);
        Ok(pad(&tagged, compute_indent(context_line)))
    }

    /// Decrypt a tagged, indented block with `password`.
    pub fn decrypt(&self, block: &str, password: &str) -> Result<String> {
        let envelope_text = remove_tag(&unpad(block));
        self.cipher.decrypt_envelope(&envelope_text, password)
    }

    /// Pick the configured secret whose id matches the block's vault-id.
    ///
    /// `secrets` is scanned in configured order; the first id match
    /// wins. A block without a vault-id, or with one no secret carries,
    /// yields [`YamlVaultError::IdentityNotFound`] — the signal to fall
    /// back to an interactive password.
    pub fn resolve_identity_for_decrypt<'a>(
        &self,
        block: &str,
        secrets: &'a [Secret],
    ) -> Result<&'a Secret> {
        let envelope_text = remove_tag(&unpad(block));
        let vault_id = envelope::extract_vault_id(&envelope_text)?;

        let matched = vault_id.as_deref().and_then(|id| {
            secrets
                .iter()
                .find(|secret| secret.id.as_deref() == Some(id))
        });

        matched.ok_or_else(|| {
            let wanted = vault_id.unwrap_or_else(|| "default".to_string());
            tracing::debug!(vault_id = %wanted, "no configured secret matches");
            YamlVaultError::IdentityNotFound(wanted)
        })
    }
}
