//! Discovery of `ansible.cfg` and extraction of vault secrets from it.
//!
//! Two keys in the `[defaults]` section matter here:
//!
//! - `vault_password_file` — path to a file holding a single password
//! - `vault_identity_list` — comma-separated `tag@passwordFile` entries
//!
//! The single password takes precedence over the identity list. Every
//! resolution re-reads the filesystem; nothing is cached, so editing the
//! config between calls takes effect immediately. A missing or unusable
//! password file is a normal "no secret configured" outcome — callers
//! never learn whether a file was absent, unreadable or empty (the
//! distinction is only logged at debug level).

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// File name looked for during config discovery.
pub const CONFIG_FILE_NAME: &str = "ansible.cfg";

const DEFAULTS_SECTION: &str = "defaults";
const PASSWORD_FILE_KEY: &str = "vault_password_file";
const IDENTITY_LIST_KEY: &str = "vault_identity_list";

/// A password, optionally labeled with the vault-id it belongs to.
///
/// The password is wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    /// Vault-id label, `None` for an unlabeled (default-identity) password.
    pub id: Option<String>,

    /// The password itself.
    pub password: String,
}

impl Secret {
    /// A labeled secret from the identity list.
    pub fn labeled(id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            password: password.into(),
        }
    }

    /// An unlabeled single password.
    pub fn unlabeled(password: impl Into<String>) -> Self {
        Self {
            id: None,
            password: password.into(),
        }
    }
}

// Keep passwords out of debug output and logs.
impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("id", &self.id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of one secret resolution pass over a config file.
///
/// Modeled as an explicit tagged result so callers pattern-match the
/// fallback ladder instead of probing two accessors in sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretResolution {
    /// Nothing configured — ask the user for a password.
    NoSecrets,

    /// `vault_password_file` yielded a password; use it for everything.
    SinglePassword(String),

    /// `vault_identity_list` yielded labeled secrets, in configured order.
    IdentityList(Vec<Secret>),
}

/// Find an `ansible.cfg` in the first candidate directory that has one.
///
/// Pure function of the directory list: each directory is checked for
/// the config file name directly, no working-directory mutation, no
/// implicit home or system fallbacks. Returns `None` when no candidate
/// yields a file.
pub fn locate_config(candidate_dirs: &[PathBuf]) -> Option<PathBuf> {
    for dir in candidate_dirs {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "found ansible.cfg");
            return Some(candidate);
        }
    }
    None
}

/// Read the single vault password referenced by `vault_password_file`.
///
/// Returns `None` when the key or section is absent, or when the
/// referenced file is missing, unreadable or empty.
pub fn read_single_password(cfg: &Path) -> Option<String> {
    let key = defaults_key(cfg, PASSWORD_FILE_KEY)?;
    password_file_contents(&resolve_path(cfg, &key))
}

/// Read the labeled secrets listed in `vault_identity_list`.
///
/// Each entry is `tag@passwordFile`, split on the first `@`. Entries
/// with an empty tag or an unusable password file are skipped, not
/// defaulted. An empty result collapses to `None` so callers can fall
/// through to an interactive prompt.
pub fn read_secret_list(cfg: &Path) -> Option<Vec<Secret>> {
    let list = defaults_key(cfg, IDENTITY_LIST_KEY)?;

    let mut secrets = Vec::new();
    for entry in list.split(',') {
        let Some((tag, password_file)) = entry.trim().split_once('@') else {
            tracing::debug!(entry, "skipping identity entry without '@'");
            continue;
        };
        if tag.is_empty() {
            tracing::debug!(entry, "skipping identity entry with empty tag");
            continue;
        }
        match password_file_contents(&resolve_path(cfg, password_file)) {
            Some(password) => secrets.push(Secret::labeled(tag, password)),
            None => {
                tracing::debug!(tag, "skipping identity with unusable password file");
            }
        }
    }

    if secrets.is_empty() {
        None
    } else {
        Some(secrets)
    }
}

/// Resolve the full fallback ladder in one call.
///
/// Precedence: single password, then identity list, then nothing.
pub fn resolve_secrets(cfg: Option<&Path>) -> SecretResolution {
    let Some(cfg) = cfg else {
        return SecretResolution::NoSecrets;
    };

    if let Some(password) = read_single_password(cfg) {
        return SecretResolution::SinglePassword(password);
    }
    if let Some(secrets) = read_secret_list(cfg) {
        return SecretResolution::IdentityList(secrets);
    }

    SecretResolution::NoSecrets
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read one key from the `[defaults]` section of `cfg`.
///
/// A config file that cannot be read or parsed collapses to `None`,
/// same as an absent key.
fn defaults_key(cfg: &Path, key: &str) -> Option<String> {
    let conf = match Ini::load_from_file(cfg) {
        Ok(conf) => conf,
        Err(e) => {
            tracing::debug!(path = %cfg.display(), error = %e, "unreadable ansible.cfg");
            return None;
        }
    };

    conf.section(Some(DEFAULTS_SECTION))
        .and_then(|section| section.get(key))
        .map(str::to_string)
}

/// Read a password file, collapsing every failure shape to `None`.
///
/// Trailing whitespace (the usual trailing newline) is stripped; a file
/// that is empty after stripping counts as no password.
fn password_file_contents(path: &Path) -> Option<String> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "unreadable password file");
            return None;
        }
    };

    let password = contents.trim_end().to_string();
    if password.is_empty() {
        tracing::debug!(path = %path.display(), "empty password file");
        return None;
    }
    Some(password)
}

/// Resolve a password-file path from the config against the config
/// file's own directory, so relative paths behave the same no matter
/// where the process was started.
fn resolve_path(cfg: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    cfg.parent().unwrap_or(Path::new(".")).join(path)
}

// ── Tests ────────────────────────────────────────────────────────────
