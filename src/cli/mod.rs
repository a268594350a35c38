//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{self, Secret, Settings};
use crate::errors::{Result, YamlVaultError};
use crate::provider;

/// yamlvault CLI: encrypt and decrypt Ansible Vault blocks in YAML documents.
#[derive(Parser)]
#[command(
    name = "yamlvault",
    about = "Encrypt and decrypt Ansible Vault blocks in YAML documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to an ansible.cfg (overrides discovery)
    #[arg(long, global = true, env = "ANSIBLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cipher program to invoke
    #[arg(long, global = true, default_value = provider::DEFAULT_PROGRAM)]
    pub cipher: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt text into a tagged, indented vault block
    Encrypt {
        /// Read the plaintext from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// The YAML line the block will nest under (controls indentation)
        #[arg(long, default_value = "")]
        context_line: String,

        /// Encrypt under this vault identity
        #[arg(long)]
        vault_id: Option<String>,
    },

    /// Decrypt a vault block back into plaintext
    Decrypt {
        /// Read the block from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by both commands
// ---------------------------------------------------------------------------

/// Read the block to transform from `file`, or stdin when no file was
/// given (the editor-extension calling convention).
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Work out which ansible.cfg to read secrets from, trying in order:
/// 1. `--config` flag / `ANSIBLE_CONFIG` env var
/// 2. `ansible_cfg` in `.yamlvault.toml`
/// 3. discovery across the settings' search directories
///
/// `None` means no config anywhere, which is a normal outcome.
pub fn resolve_config_path(cli: &Cli) -> Result<Option<PathBuf>> {
    if let Some(path) = &cli.config {
        return Ok(Some(path.clone()));
    }

    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;

    if let Some(path) = settings.ansible_cfg_path(&cwd) {
        return Ok(Some(path));
    }

    Ok(config::locate_config(&settings.candidate_dirs(&cwd)))
}

/// Ask the user for a vault password.
///
/// `YAMLVAULT_PASSWORD` is checked first so scripted use never blocks on
/// a prompt. Returns `Zeroizing<String>` so the password is wiped from
/// memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("YAMLVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Vault password")
        .interact()
        .map_err(|e| YamlVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Let the user pick one identity from the configured list.
pub fn pick_identity(mut secrets: Vec<Secret>) -> Result<Secret> {
    let labels: Vec<String> = secrets
        .iter()
        .map(|s| s.id.clone().unwrap_or_else(|| "default".to_string()))
        .collect();

    let index = dialoguer::Select::new()
        .with_prompt("Vault identity")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| YamlVaultError::CommandFailed(format!("identity prompt: {e}")))?;

    Ok(secrets.swap_remove(index))
}
