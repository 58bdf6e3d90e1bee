//! `amplify-reconcile print` command.

use crate::manifest::{render, ManifestKind};

/// Execute the `print` command.
///
/// # Errors
///
/// Returns an error string if the manifest cannot be rendered.
pub fn run(kind: ManifestKind) -> Result<(), String> {
    let text = render(kind).map_err(|e| e.to_string())?;
    print!("{text}");
    Ok(())
}
