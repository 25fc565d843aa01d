//! Destination manifest handling: reading, generated defaults, and merging
//!
//! The merge itself is a pure function over JSON maps so it can be tested
//! without touching the filesystem.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use tokio::fs;

use crate::author::AuthorInfo;

/// Manifest filename at the destination root
pub const MANIFEST_FILE: &str = "package.json";

/// Version stamped into freshly generated manifests
pub const INITIAL_VERSION: &str = "0.0.1";

/// Engine constraint stamped into freshly generated manifests
pub const NPM_ENGINE_CONSTRAINT: &str = ">= 10.0.0";

/// Default props captured during initialization from whatever manifest is
/// already at the destination.
#[derive(Debug, Clone, Default)]
pub struct ManifestProps {
    pub name: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub author: AuthorInfo,
}

impl ManifestProps {
    pub fn from_manifest(manifest: &Map<String, Value>) -> Self {
        Self {
            name: string_value(manifest, "name"),
            description: string_value(manifest, "description"),
            homepage: string_value(manifest, "homepage"),
            author: AuthorInfo::from_manifest_field(manifest.get("author")),
        }
    }
}

fn string_value(manifest: &Map<String, Value>, key: &str) -> Option<String> {
    manifest.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Read the destination manifest. An absent file is an empty object, never an
/// error; a present but unparsable file is.
pub async fn read_manifest(dir: &Path) -> Result<Map<String, Value>> {
    let path = dir.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("{} is not a JSON object", path.display()),
    }
}

/// Overwrite the destination manifest in place, pretty-printed.
pub async fn write_manifest(dir: &Path, manifest: &Map<String, Value>) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);
    let mut content = serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    content.push('\n');
    fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Build the generated default manifest. Props that were never captured are
/// omitted rather than written as null.
pub fn default_manifest(props: &ManifestProps) -> Map<String, Value> {
    let mut manifest = Map::new();

    if let Some(name) = &props.name {
        manifest.insert("name".to_string(), json!(name));
    }
    manifest.insert("version".to_string(), json!(INITIAL_VERSION));
    if let Some(description) = &props.description {
        manifest.insert("description".to_string(), json!(description));
    }
    if let Some(homepage) = &props.homepage {
        manifest.insert("homepage".to_string(), json!(homepage));
    }

    if let Some(author) = props.author.manifest_value() {
        manifest.insert("author".to_string(), author);
    }

    manifest.insert("files".to_string(), json!(["lib"]));
    manifest.insert("keywords".to_string(), json!([]));
    manifest.insert("engines".to_string(), json!({ "npm": NPM_ENGINE_CONSTRAINT }));

    manifest
}

/// Validate, merge, and write the destination manifest in one step.
///
/// When the defaults carry a `name`, it is checked for package-name legality
/// first; an illegal name aborts before the manifest file is touched.
pub async fn apply_generated_defaults(dir: &Path, props: &ManifestProps) -> Result<()> {
    if let Some(name) = &props.name {
        crate::validate::validate_package_name(name).map_err(|e| {
            anyhow::anyhow!("Manifest name '{}' is not a legal package name: {}", name, e)
        })?;
    }

    let existing = read_manifest(dir).await?;
    let merged = merge_manifests(default_manifest(props), existing);
    write_manifest(dir, &merged).await
}

/// Merge generated defaults with the existing destination manifest.
///
/// For every key present in both, the existing value wins. Nested objects are
/// merged recursively under the same rule. Arrays are never merged
/// element-wise: the existing array replaces the default wholesale.
pub fn merge_manifests(
    defaults: Map<String, Value>,
    existing: Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = defaults;
    for (key, value) in existing {
        match (merged.get_mut(&key), value) {
            (Some(Value::Object(base)), Value::Object(incoming)) => {
                let combined = merge_manifests(std::mem::take(base), incoming);
                merged.insert(key, Value::Object(combined));
            }
            (_, value) => {
                merged.insert(key, value);
            }
        }
    }
    merged
}
