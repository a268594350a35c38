//! The `!vault` YAML tag marking a block as vault-encrypted.

/// Marker identifying vault-encrypted content in a YAML document.
pub const VAULT_TAG: &str = "!vault";

/// Prepend the `!vault |` tag line to `text`.
///
/// No-op when the marker already occurs anywhere in the text, so the
/// operation is idempotent.
pub fn add_tag(text: &str) -> String {
    if text.contains(VAULT_TAG) {
        return text.to_string();
    }
    format!("{VAULT_TAG} |\n{text}")
}

/// Strip the `!vault` tag decoration from `text`.
///
/// Drops every line whose content contains the marker and left-trims the
/// kept lines, so the result is ready for envelope parsing. No-op when
/// the marker is absent. Note this is not a strict inverse of
/// [`add_tag`]: bodies with indented lines come back left-trimmed.
pub fn remove_tag(text: &str) -> String {
    if !text.contains(VAULT_TAG) {
        return text.to_string();
    }

    text.split('\n')
        .filter(|line| !line.trim().contains(VAULT_TAG))
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n")
}
