//! Text shaping for vault blocks embedded in YAML.
//!
//! This module provides:
//! - indentation-aware padding so encrypted blocks stay valid YAML (`indent`)
//! - the `!vault` tag decoration marking a block as encrypted (`tag`)

pub mod indent;
pub mod tag;

// Re-export the most commonly used items.
pub use indent::{compute_indent, pad, unpad};
pub use tag::{add_tag, remove_tag, VAULT_TAG};
