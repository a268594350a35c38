//! The bundled cipher provider: the `ansible-vault` executable.
//!
//! Key derivation, AES-CTR and HMAC all live in that external tool; this
//! module only shuttles text in and out of it. The password is handed
//! over through a short-lived temp file (created `0600` on Unix by
//! `tempfile`), plaintext and envelope text travel via stdin/stdout.

use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

use crate::errors::{Result, YamlVaultError};
use crate::transform::VaultCipher;

/// Program invoked when no explicit path is configured.
pub const DEFAULT_PROGRAM: &str = "ansible-vault";

/// [`VaultCipher`] implementation backed by the `ansible-vault` CLI.
pub struct AnsibleVaultCli {
    program: OsString,
}

impl Default for AnsibleVaultCli {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl AnsibleVaultCli {
    /// Use `program` as the cipher executable (name on `$PATH` or a
    /// full path).
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Write the password to a temp file the subprocess can read.
    ///
    /// The file is deleted when the returned handle drops, so it must
    /// stay alive until the subprocess has finished.
    fn password_file(password: &str) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(password.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;
        Ok(file)
    }

    /// Run the cipher program with `args`, feeding `stdin_text` and
    /// returning its stdout. A non-zero exit reports stderr.
    fn run(&self, args: &[&OsStr], stdin_text: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(stdin_text.as_bytes())?;
            // Dropping stdin closes the pipe so the child sees EOF.
        }

        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(YamlVaultError::CommandFailed(format!(
                "{} exited with {}: {}",
                self.program.to_string_lossy(),
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|_| {
            YamlVaultError::CommandFailed(format!(
                "{} produced non-UTF-8 output",
                self.program.to_string_lossy()
            ))
        })
    }
}

impl VaultCipher for AnsibleVaultCli {
    fn encrypt_envelope(
        &self,
        plaintext: &str,
        password: &str,
        vault_id: Option<&str>,
    ) -> Result<String> {
        let password_file = Self::password_file(password)?;

        let mut args: Vec<OsString> = vec!["encrypt".into()];
        match vault_id {
            Some(id) => {
                // Label the identity so the 1.2 header records it.
                let mut identity = OsString::from(format!("{id}@"));
                identity.push(password_file.path());
                args.push("--vault-id".into());
                args.push(identity);
                args.push("--encrypt-vault-id".into());
                args.push(id.into());
            }
            None => {
                args.push("--vault-password-file".into());
                args.push(password_file.path().into());
            }
        }
        args.push("--output".into());
        args.push("-".into());
        args.push("-".into());

        let arg_refs: Vec<&OsStr> = args.iter().map(OsString::as_os_str).collect();
        self.run(&arg_refs, plaintext)
            .map_err(|e| YamlVaultError::EncryptionFailed(e.to_string()))
    }

    fn decrypt_envelope(&self, envelope_text: &str, password: &str) -> Result<String> {
        let password_file = Self::password_file(password)?;

        let mut args: Vec<OsString> = vec!["decrypt".into(), "--vault-password-file".into()];
        args.push(password_file.path().into());
        args.push("--output".into());
        args.push("-".into());
        args.push("-".into());

        let arg_refs: Vec<&OsStr> = args.iter().map(OsString::as_os_str).collect();
        self.run(&arg_refs, envelope_text).map_err(|e| {
            tracing::debug!(error = %e, "cipher provider rejected the envelope");
            YamlVaultError::DecryptionFailed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_surfaces_as_encryption_failure() {
        let provider = AnsibleVaultCli::new("/nonexistent/ansible-vault");
        let result = provider.encrypt_envelope("secret", "pw", None);
        assert!(matches!(result, Err(YamlVaultError::EncryptionFailed(_))));
    }

    #[test]
    fn missing_program_surfaces_as_decryption_failure() {
        let provider = AnsibleVaultCli::new("/nonexistent/ansible-vault");
        let result = provider.decrypt_envelope("$ANSIBLE_VAULT;1.1;AES256\n00", "pw");
        assert!(matches!(result, Err(YamlVaultError::DecryptionFailed)));
    }
}
