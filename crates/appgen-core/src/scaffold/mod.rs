//! Template selection and scaffold writing
//!
//! This module provides:
//! - The artifact-kind to generation-plan mapping
//! - Tree copying and single-file placeholder rendering
//! - Resolution of the shipped template root

pub mod plan;
pub mod writer;

pub use plan::{plan_for, ArtifactKind, GenerationPlan, GenerationRequest};
pub use writer::{copy_tree, render_file, Overwrite, ScaffoldError};

use std::path::PathBuf;

use anyhow::Result;

/// Environment variable name for overriding the template root
pub const TEMPLATE_DIR_ENV: &str = "APPGEN_TEMPLATE_DIR";

/// Locate the shipped template root.
///
/// Resolution order: an explicit path (CLI flag), the `APPGEN_TEMPLATE_DIR`
/// environment variable, a `templates/` directory next to the running
/// executable, then `templates/` under the current directory.
pub fn resolve_template_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_dir() {
            return Ok(path);
        }
        anyhow::bail!("Template directory not found: {}", path.display());
    }

    if let Ok(path) = std::env::var(TEMPLATE_DIR_ENV) {
        let path = PathBuf::from(path);
        if path.is_dir() {
            return Ok(path);
        }
        anyhow::bail!(
            "{} points at a missing directory: {}",
            TEMPLATE_DIR_ENV,
            path.display()
        );
    }

    let mut tried = Vec::new();

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join("templates");
            if candidate.is_dir() {
                return Ok(candidate);
            }
            tried.push(candidate);
        }
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let candidate = cwd.join("templates");
    if candidate.is_dir() {
        return Ok(candidate);
    }
    tried.push(candidate);

    anyhow::bail!(
        "No template directory found (tried: {})",
        tried
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )
}
