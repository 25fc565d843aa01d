//! Scaffold writing: tree copies and placeholder renders

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::fs;
use walkdir::WalkDir;

/// Whether a render may replace an existing destination file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    Deny,
    Allow,
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("refusing to overwrite existing file: {0}")]
    DestinationExists(PathBuf),
}

/// Recursively copy a template tree into `dest`, dotfiles included.
///
/// Relative paths and file contents are preserved byte-for-byte. The first
/// failure aborts the copy and propagates; files already written stay in
/// place. Returns the relative paths of every copied file.
pub async fn copy_tree(src: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    if !src.is_dir() {
        anyhow::bail!("Template tree not found: {}", src.display());
    }
    fs::create_dir_all(dest)
        .await
        .context("Failed to create target directory")?;

    let mut copied = Vec::new();

    for entry in WalkDir::new(src) {
        let entry =
            entry.with_context(|| format!("Failed to walk template tree {}", src.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(src)?.to_path_buf();
        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = fs::read(entry.path())
            .await
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        fs::write(&target, &content)
            .await
            .with_context(|| format!("Failed to write file: {}", target.display()))?;

        copied.push(relative);
    }

    Ok(copied)
}

/// Render a single-file template, substituting every `{{key}}` occurrence,
/// and write it to `dest`.
///
/// An existing destination is an error unless `Overwrite::Allow`; the check
/// runs before anything is written.
pub async fn render_file(
    src: &Path,
    dest: &Path,
    placeholders: &HashMap<String, String>,
    overwrite: Overwrite,
) -> Result<()> {
    if overwrite == Overwrite::Deny && fs::try_exists(dest).await.unwrap_or(false) {
        return Err(ScaffoldError::DestinationExists(dest.to_path_buf()).into());
    }

    let template = fs::read_to_string(src)
        .await
        .with_context(|| format!("Failed to read template {}", src.display()))?;
    let rendered = substitute(&template, placeholders);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(dest, rendered)
        .await
        .with_context(|| format!("Failed to write file: {}", dest.display()))
}

/// Replace every `{{key}}` token with its value
pub fn substitute(template: &str, placeholders: &HashMap<String, String>) -> String {
    let mut rendered = template.to_string();
    for (key, value) in placeholders {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}
