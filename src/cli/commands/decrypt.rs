//! `yamlvault decrypt` — turn a vault block back into plaintext.

use std::path::Path;

use crate::cli::{output, prompt_password, read_input, resolve_config_path, Cli};
use crate::config::{self, SecretResolution};
use crate::envelope::Envelope;
use crate::errors::{Result, YamlVaultError};
use crate::provider::AnsibleVaultCli;
use crate::text::{remove_tag, unpad};
use crate::transform::VaultTransformer;

/// Execute the `decrypt` command.
pub fn execute(cli: &Cli, file: Option<&Path>) -> Result<()> {
    let block = read_input(file)?;

    // Fail fast on text that is not a vault envelope at all: the block
    // is left untouched and no cipher process is spawned.
    let envelope = Envelope::parse(&remove_tag(&unpad(&block)))?;
    tracing::debug!(
        version = envelope.header.version.as_str(),
        vault_id = ?envelope.header.vault_id,
        "decrypting vault block"
    );

    let cfg = resolve_config_path(cli)?;
    let transformer = VaultTransformer::new(AnsibleVaultCli::new(&cli.cipher));

    let plaintext = match config::resolve_secrets(cfg.as_deref()) {
        SecretResolution::SinglePassword(password) => transformer.decrypt(&block, &password)?,

        SecretResolution::IdentityList(secrets) => {
            match transformer.resolve_identity_for_decrypt(&block, &secrets) {
                Ok(secret) => transformer.decrypt(&block, &secret.password)?,
                Err(YamlVaultError::IdentityNotFound(id)) => {
                    // Fallback signal, not a hard failure: ask for a
                    // one-off password. It is never persisted.
                    output::warning(&format!("No configured secret for vault-id '{id}'"));
                    let password = prompt_password()?;
                    transformer.decrypt(&block, &password)?
                }
                Err(e) => return Err(e),
            }
        }

        SecretResolution::NoSecrets => {
            let password = prompt_password()?;
            transformer.decrypt(&block, &password)?
        }
    };

    print!("{plaintext}");
    Ok(())
}
