//! Configuration — `ansible.cfg` secret resolution and project settings.
//!
//! This module provides:
//! - discovery of `ansible.cfg` and extraction of vault secrets (`resolver`)
//! - project-level `.yamlvault.toml` settings (`settings`)

pub mod resolver;
pub mod settings;

// Re-export the most commonly used items.
pub use resolver::{
    locate_config, read_secret_list, read_single_password, resolve_secrets, Secret,
    SecretResolution, CONFIG_FILE_NAME,
};
pub use settings::Settings;
