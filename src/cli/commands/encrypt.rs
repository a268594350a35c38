//! `yamlvault encrypt` — turn plaintext into a tagged, indented vault block.

use std::path::Path;

use crate::cli::{pick_identity, prompt_password, read_input, resolve_config_path, Cli};
use crate::config::{self, Secret, SecretResolution};
use crate::errors::{Result, YamlVaultError};
use crate::provider::AnsibleVaultCli;
use crate::transform::VaultTransformer;

/// Execute the `encrypt` command.
pub fn execute(
    cli: &Cli,
    file: Option<&Path>,
    context_line: &str,
    vault_id: Option<&str>,
) -> Result<()> {
    let plaintext = read_input(file)?;

    let cfg = resolve_config_path(cli)?;
    let resolution = config::resolve_secrets(cfg.as_deref());
    let secret = select_secret(resolution, vault_id)?;

    let transformer = VaultTransformer::new(AnsibleVaultCli::new(&cli.cipher));
    let block = transformer.encrypt(&plaintext, &secret, context_line)?;

    print!("{block}");
    Ok(())
}

/// Pick the secret to encrypt with, following the configured fallback
/// ladder: single password, then identity list, then interactive prompt.
fn select_secret(resolution: SecretResolution, vault_id: Option<&str>) -> Result<Secret> {
    match resolution {
        // The single password applies to every block; an explicit
        // --vault-id still labels the envelope.
        SecretResolution::SinglePassword(password) => Ok(Secret {
            id: vault_id.map(str::to_string),
            password,
        }),

        SecretResolution::IdentityList(secrets) => match vault_id {
            Some(id) => secrets
                .into_iter()
                .find(|s| s.id.as_deref() == Some(id))
                .ok_or_else(|| YamlVaultError::IdentityNotFound(id.to_string())),
            None => pick_identity(secrets),
        },

        SecretResolution::NoSecrets => {
            let password = prompt_password()?;
            Ok(Secret {
                id: vault_id.map(str::to_string),
                password: password.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_password_wins_and_takes_the_requested_label() {
        let secret = select_secret(
            SecretResolution::SinglePassword("pw".into()),
            Some("prod"),
        )
        .unwrap();
        assert_eq!(secret, Secret::labeled("prod", "pw"));
    }

    #[test]
    fn identity_list_honors_explicit_vault_id() {
        let resolution = SecretResolution::IdentityList(vec![
            Secret::labeled("dev", "d"),
            Secret::labeled("prod", "p"),
        ]);
        let secret = select_secret(resolution, Some("prod")).unwrap();
        assert_eq!(secret, Secret::labeled("prod", "p"));
    }

    #[test]
    fn unknown_vault_id_is_reported() {
        let resolution = SecretResolution::IdentityList(vec![Secret::labeled("dev", "d")]);
        assert!(matches!(
            select_secret(resolution, Some("prod")),
            Err(YamlVaultError::IdentityNotFound(id)) if id == "prod"
        ));
    }
}
